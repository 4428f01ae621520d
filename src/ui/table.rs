use crate::fetch::FetchOutcome;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct OutcomeRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Query")]
    pub query: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Status")]
    pub status: &'static str,
}

pub struct TableBuilder {
    rows: Vec<OutcomeRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_outcome(&mut self, outcome: &FetchOutcome) {
        self.rows.push(OutcomeRow {
            index: self.rows.len() + 1,
            query: outcome.query.to_string(),
            rows: outcome.rows,
            status: if outcome.succeeded { "ok" } else { "failed" },
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one row per query with its fetch result
pub fn summary_table(outcomes: &[FetchOutcome]) -> String {
    let mut builder = TableBuilder::new();
    for outcome in outcomes {
        builder.add_outcome(outcome);
    }
    builder.build()
}
