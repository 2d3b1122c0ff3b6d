//! Tests for catalog filtering and video helpers

mod filter_tests;

use crate::app::models::Catalog;

/// Catalog in the flag schema covering every filter dimension
pub const FLAG_CATALOG: &str = "\
Filename,Subject,Category,isKinder,isFirst,isSecond,Video Title,Video Link
Counting Fun,Math,Activity,TRUE,FALSE,TRUE,Counting to Ten,https://youtu.be/dQw4w9WgXcQ
Number Bonds,math,Ganes,FALSE,TRUE,FALSE,n/a,n/a
Shape Hunt,MATH,Games,TRUE,TRUE,TRUE,Shapes Song (Part 1),https://www.youtube.com/watch?v=aaaaaaaaaaa
Rhyming Pairs,Reading,Activity,TRUE,FALSE,FALSE,Counting to Ten again,https://youtu.be/dQw4w9WgXcQ
Reading at Home,Parent Resources Guide,Parent Guide,FALSE,FALSE,FALSE,,
Sight Word Bingo,Reading,Games,FALSE,FALSE,TRUE,,
";

pub fn flag_catalog() -> Catalog {
    Catalog::from_csv_text(FLAG_CATALOG)
}

pub fn titles<'a>(records: &[&'a crate::app::models::WorksheetRecord]) -> Vec<&'a str> {
    records.iter().map(|r| r.filename.as_str()).collect()
}
