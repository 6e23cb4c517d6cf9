//! Probbase loader.
//!
//! Reads the rule table from its tabular resource. Columns are found by
//! header name, so column order does not matter and extra columns (the
//! probability columns of a full probbase) are ignored.
//!
//! Layout: one header line, one prior row, then one row per symptom.

use std::fs;
use std::io::Read;
use std::path::Path;

use vacheck_foundation::{Error, ErrorContext, Polarity, Result};

use crate::builder::{RuleTableBuilder, SymptomSpec};
use crate::row::{MAX_DONT_ASK, PriorRow};
use crate::table::RuleTable;
use crate::tabular::{Tabular, TabularRow};

/// Header names read by the loader.
pub mod columns {
    /// Symptom code (indicator).
    pub const INDIC: &str = "indic";
    /// Short description.
    pub const SDESC: &str = "sdesc";
    /// Long description.
    pub const QDESC: &str = "qdesc";
    /// Who is asked.
    pub const WHO: &str = "who";
    /// Trigger direction flag.
    pub const SUBST: &str = "subst";
    /// Inference rule cell.
    pub const ASKIF: &str = "askif";
    /// Neonate indicator cell.
    pub const NNONLY: &str = "nnonly";
    /// Dependency rule cells, in evaluation order.
    pub const DONTASK: [&str; super::MAX_DONT_ASK] = [
        "dontask1", "dontask2", "dontask3", "dontask4", "dontask5", "dontask6", "dontask7",
        "dontask8",
    ];
}

// =============================================================================
// Layout
// =============================================================================

/// Expected shape of a rule table resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableLayout {
    /// Number of symptom rows after the prior row.
    pub symptom_count: usize,
}

impl TableLayout {
    /// Symptom rows in the InterVA5 probbase.
    pub const INTERVA5_SYMPTOMS: usize = 353;

    /// The InterVA5 layout: 353 symptoms, so 354 data rows and 354-element
    /// vectors.
    #[must_use]
    pub const fn interva5() -> Self {
        Self {
            symptom_count: Self::INTERVA5_SYMPTOMS,
        }
    }

    /// A layout with a custom symptom count.
    #[must_use]
    pub const fn with_symptom_count(symptom_count: usize) -> Self {
        Self { symptom_count }
    }

    /// Data rows expected in the resource (prior row included).
    #[must_use]
    pub const fn expected_rows(&self) -> usize {
        self.symptom_count + 1
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::interva5()
    }
}

// =============================================================================
// Loading
// =============================================================================

struct ColumnMap {
    indic: usize,
    sdesc: usize,
    qdesc: usize,
    who: usize,
    subst: usize,
    dontask: [usize; MAX_DONT_ASK],
    askif: usize,
    nnonly: usize,
}

impl ColumnMap {
    fn resolve(table: &Tabular) -> Result<Self> {
        let mut dontask = [0; MAX_DONT_ASK];
        for (slot, name) in dontask.iter_mut().zip(columns::DONTASK) {
            *slot = table.require_column(name)?;
        }
        Ok(Self {
            indic: table.require_column(columns::INDIC)?,
            sdesc: table.require_column(columns::SDESC)?,
            qdesc: table.require_column(columns::QDESC)?,
            who: table.require_column(columns::WHO)?,
            subst: table.require_column(columns::SUBST)?,
            dontask,
            askif: table.require_column(columns::ASKIF)?,
            nnonly: table.require_column(columns::NNONLY)?,
        })
    }
}

/// Splits a rule cell such as `i022aY` into code and polarity.
fn parse_rule_cell<'a>(
    table: &Tabular,
    row: &TabularRow,
    column: &str,
    cell: &'a str,
) -> Result<(&'a str, Polarity)> {
    let malformed = || {
        Error::resource(format!(
            "rule cell {cell:?} must be a 5-character code followed by Y or N"
        ))
        .with_context(table.context(row, Some(column)))
    };
    let mut chars = cell.char_indices();
    let (split, flag) = chars.nth(vacheck_foundation::CODE_LEN).ok_or_else(malformed)?;
    if chars.next().is_some() {
        return Err(malformed());
    }
    let polarity = Polarity::from_char(flag).ok_or_else(malformed)?;
    Ok((&cell[..split], polarity))
}

fn parse_symptom(table: &Tabular, cols: &ColumnMap, row: &TabularRow) -> Result<SymptomSpec> {
    let subst_cell = row.get(cols.subst).trim();
    let subst = Polarity::parse(subst_cell).ok_or_else(|| {
        Error::resource(format!("trigger flag {subst_cell:?} must be Y or N"))
            .with_context(table.context(row, Some(columns::SUBST)))
    })?;

    let mut spec = SymptomSpec::new(row.get(cols.indic).trim(), subst)
        .with_descriptions(
            row.get(cols.sdesc).trim(),
            row.get(cols.qdesc).trim(),
            row.get(cols.who).trim(),
        )
        .with_origin(table.context(row, None));

    for (&index, name) in cols.dontask.iter().zip(columns::DONTASK) {
        let cell = row.get(index).trim();
        if !cell.is_empty() {
            let (code, polarity) = parse_rule_cell(table, row, name, cell)?;
            spec = spec.dont_ask(code, polarity);
        }
    }

    let cell = row.get(cols.askif).trim();
    if !cell.is_empty() {
        let (code, polarity) = parse_rule_cell(table, row, columns::ASKIF, cell)?;
        spec = spec.ask_if(code, polarity);
    }

    let cell = row.get(cols.nnonly).trim();
    if !cell.is_empty() {
        // Only the leading code matters; a trailing flag is tolerated.
        let code = cell.get(..vacheck_foundation::CODE_LEN).unwrap_or(cell);
        spec = spec.neonate_only(code);
    }

    Ok(spec)
}

impl RuleTable {
    /// Parses a rule table from text.
    ///
    /// # Errors
    ///
    /// Returns a resource error if a required column is missing, the data
    /// row count is not `layout.expected_rows()`, or any row is malformed.
    pub fn from_csv_str(text: &str, layout: &TableLayout) -> Result<Self> {
        Self::from_csv_named(text, "<memory>", layout)
    }

    /// Parses a rule table from text, naming the source in errors.
    ///
    /// # Errors
    ///
    /// See [`RuleTable::from_csv_str`].
    pub fn from_csv_named(text: &str, source: &str, layout: &TableLayout) -> Result<Self> {
        let table = Tabular::parse(text, source)?;
        let cols = ColumnMap::resolve(&table)?;

        if table.rows.len() != layout.expected_rows() {
            return Err(Error::resource(format!(
                "rule table must have {} data rows (prior row plus {} symptoms), found {}",
                layout.expected_rows(),
                layout.symptom_count,
                table.rows.len()
            ))
            .with_context(ErrorContext::new().with_source(source)));
        }

        let (prior_row, symptom_rows) = table
            .rows
            .split_first()
            .ok_or_else(|| Error::resource("rule table has no prior row"))?;
        let prior = PriorRow {
            short_desc: prior_row.get(cols.sdesc).trim().to_string(),
            long_desc: prior_row.get(cols.qdesc).trim().to_string(),
        };

        let mut builder = RuleTableBuilder::new().prior(prior);
        for row in symptom_rows {
            builder.push(parse_symptom(&table, &cols, row)?);
        }
        let rules = builder.build()?;

        tracing::debug!(
            source,
            symptoms = rules.symptom_count(),
            rules = rules.rule_count(),
            "loaded rule table"
        );
        Ok(rules)
    }

    /// Reads a rule table from any reader.
    ///
    /// # Errors
    ///
    /// Returns a resource error if reading fails or the content is malformed.
    pub fn from_reader<R: Read>(mut reader: R, layout: &TableLayout) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::resource(format!("failed to read rule table: {e}")))?;
        Self::from_csv_str(&text, layout)
    }

    /// Loads a rule table from a file.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the file is missing, unreadable, or
    /// malformed.
    pub fn load<P: AsRef<Path>>(path: P, layout: &TableLayout) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::resource(format!("failed to read rule table '{}': {e}", path.display()))
        })?;
        Self::from_csv_named(&text, &path.display().to_string(), layout)
    }
}
