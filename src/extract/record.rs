/// Column headers, in the same order as [`Record::cells`]
pub const COLUMN_HEADERS: [&str; 11] = [
    "Rank",
    "Name",
    "State",
    "Tuition",
    "Acc Rate",
    "SAT Range",
    "ACT Range",
    "Engineering",
    "Business",
    "CS",
    "Nursing",
];

/// One normalized institution row
///
/// Every field is independently optional; `None` means the value was missing
/// or could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub rank: Option<u32>,
    pub name: Option<String>,
    pub state: Option<String>,
    /// Yearly tuition in the source currency
    pub tuition: Option<f64>,
    /// Fraction in `[0, 1]`
    pub acceptance_rate: Option<f64>,
    pub sat_range: Option<String>,
    pub act_range: Option<String>,
    pub engineering_score: Option<f64>,
    pub business_score: Option<f64>,
    pub cs_score: Option<f64>,
    pub nursing_score: Option<f64>,
}

/// A single typed table cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Unknown,
    Integer(u32),
    Number(f64),
    Text(&'a str),
}

impl Cell<'_> {
    /// Renders the cell as text, using `unknown` for missing values
    pub fn render(&self, unknown: &str) -> String {
        match self {
            Cell::Unknown => unknown.to_string(),
            Cell::Integer(value) => value.to_string(),
            Cell::Number(value) => value.to_string(),
            Cell::Text(value) => (*value).to_string(),
        }
    }
}

impl Record {
    /// Returns the record's cells in column order
    pub fn cells(&self) -> [Cell<'_>; 11] {
        [
            self.rank.map_or(Cell::Unknown, Cell::Integer),
            text_cell(&self.name),
            text_cell(&self.state),
            number_cell(self.tuition),
            number_cell(self.acceptance_rate),
            text_cell(&self.sat_range),
            text_cell(&self.act_range),
            number_cell(self.engineering_score),
            number_cell(self.business_score),
            number_cell(self.cs_score),
            number_cell(self.nursing_score),
        ]
    }

    /// Number of fields that are unknown
    pub fn unknown_count(&self) -> usize {
        self.cells()
            .iter()
            .filter(|cell| matches!(cell, Cell::Unknown))
            .count()
    }
}

fn text_cell(value: &Option<String>) -> Cell<'_> {
    value.as_deref().map_or(Cell::Unknown, Cell::Text)
}

fn number_cell(value: Option<f64>) -> Cell<'static> {
    value.map_or(Cell::Unknown, Cell::Number)
}
