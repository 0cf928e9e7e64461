//! CSV export of scraped records

use crate::types::PageRecord;

/// Render all records as CSV
///
/// Header is `url,meta_title,meta_description`. Every record appears
/// exactly once, including those with empty metadata, so the export is a
/// faithful flat dump of the scrape.
pub fn records_to_csv(records: &[PageRecord]) -> String {
    let mut out = String::from("url,meta_title,meta_description\n");
    for record in records {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&record.url),
            csv_escape(&record.title),
            csv_escape(&record.description)
        ));
    }
    out
}

/// RFC4180-style field quoting
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_records_to_csv() {
        let records = vec![
            PageRecord {
                url: "https://x.com/a".to_string(),
                title: "A, inc".to_string(),
                description: "About \"A\"".to_string(),
            },
            PageRecord::empty("https://x.com/b"),
        ];
        let csv = records_to_csv(&records);
        let expected = "\
url,meta_title,meta_description
https://x.com/a,\"A, inc\",\"About \"\"A\"\"\"
https://x.com/b,,
";
        assert_eq!(csv, expected);
    }
}
