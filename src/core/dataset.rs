use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;

/// Read-only sample of the dataset shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DatasetPreview {
    pub fn from_csv_bytes(data: &[u8], max_rows: usize) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::with_capacity(max_rows);
        for record in reader.records().take(max_rows) {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }
}

impl fmt::Display for DatasetPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        writeln!(f, "{}", line(&self.headers))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write!(f, "{}", rule.join("-+-"))?;
        for row in &self.rows {
            write!(f, "\n{}", line(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "PassengerId,Survived,Pclass,Name,Sex\n\
1,0,3,\"Braund, Mr. Owen Harris\",male\n\
2,1,1,\"Cumings, Mrs. John Bradley\",female\n\
3,1,3,\"Heikkinen, Miss. Laina\",female\n";

    #[test]
    fn test_preview_keeps_first_rows() {
        let preview = DatasetPreview::from_csv_bytes(SAMPLE.as_bytes(), 2).unwrap();
        assert_eq!(preview.headers, vec!["PassengerId", "Survived", "Pclass", "Name", "Sex"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0][3], "Braund, Mr. Owen Harris");
    }

    #[test]
    fn test_preview_shorter_than_limit() {
        let preview = DatasetPreview::from_csv_bytes(SAMPLE.as_bytes(), 5).unwrap();
        assert_eq!(preview.rows.len(), 3);
    }

    #[test]
    fn test_display_aligns_columns() {
        let preview = DatasetPreview::from_csv_bytes(b"a,bb\n1,2\n333,4\n", 5).unwrap();
        let rendered = preview.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "a   | bb");
        assert_eq!(lines[1], "----+---");
        assert_eq!(lines[2], "1   | 2");
        assert_eq!(lines[3], "333 | 4");
    }
}
