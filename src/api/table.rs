use serde::Serialize;

/// Tabular job or trial info as delivered by the CSV endpoints.
///
/// Lines are split on `\n` and fields on `,`. Quoting is not understood, so a
/// field containing a comma shifts the rest of its row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn parse(text: &str) -> Self {
        let mut lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').map(str::to_owned).collect::<Vec<_>>());
        let header = lines.next().unwrap_or_default();
        Table {
            header,
            rows: lines.collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Values of one column, skipping rows too short to have it.
    pub fn values<'a>(&'a self, name: &str) -> Vec<&'a str> {
        match self.column(name) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }
}
