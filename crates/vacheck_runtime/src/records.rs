//! Record files.
//!
//! A record file has one identifier column followed by one column per
//! symptom, in rule table order. Values use the `y`/`n`/`.` encoding.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use vacheck_engine::SymptomVector;
use vacheck_foundation::{Error, ErrorContext, ErrorKind, Result};
use vacheck_table::Codebook;
use vacheck_table::tabular::{self, Tabular};

/// Validated records sharing one codebook.
#[derive(Clone, Debug)]
pub struct RecordSet {
    id_header: String,
    codebook: Arc<Codebook>,
    records: Vec<SymptomVector>,
}

impl RecordSet {
    /// Creates an empty set with `ID` as the identifier header.
    #[must_use]
    pub fn new(codebook: &Arc<Codebook>) -> Self {
        Self {
            id_header: "ID".to_string(),
            codebook: Arc::clone(codebook),
            records: Vec::new(),
        }
    }

    /// Builder method to set the identifier column header.
    #[must_use]
    pub fn with_id_header(mut self, header: impl Into<String>) -> Self {
        self.id_header = header.into();
        self
    }

    /// Parses records from text.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the header does not list the codebook's
    /// codes in order, or an input error (with line and column context) for
    /// the first invalid record.
    pub fn from_csv_str(text: &str, codebook: &Arc<Codebook>) -> Result<Self> {
        Self::from_csv_named(text, "<memory>", codebook)
    }

    /// Parses records from text, naming the source in errors.
    ///
    /// # Errors
    ///
    /// See [`RecordSet::from_csv_str`].
    pub fn from_csv_named(text: &str, source: &str, codebook: &Arc<Codebook>) -> Result<Self> {
        let table = Tabular::parse(text, source)?;
        check_header(&table, codebook)?;

        let mut records = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let fields: Vec<&str> = row.fields.iter().map(|f| f.trim()).collect();
            let id = fields.first().copied().unwrap_or_default();
            let vector = SymptomVector::from_fields(id, &fields, codebook).map_err(|e| {
                let column = match &e.kind {
                    ErrorKind::InputDomain { position, .. } => table.headers.get(*position),
                    ErrorKind::InputIdentifier(_) => table.headers.first(),
                    _ => None,
                };
                let context = table.context(row, column.map(String::as_str));
                e.with_context(context)
            })?;
            records.push(vector);
        }

        tracing::debug!(source, records = records.len(), "loaded records");
        Ok(Self {
            id_header: table.headers[0].clone(),
            codebook: Arc::clone(codebook),
            records,
        })
    }

    /// Loads records from a file.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the file is unreadable, plus everything
    /// [`RecordSet::from_csv_str`] reports.
    pub fn load<P: AsRef<Path>>(path: P, codebook: &Arc<Codebook>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::resource(format!("failed to read records '{}': {e}", path.display()))
        })?;
        Self::from_csv_named(&text, &path.display().to_string(), codebook)
    }

    /// Appends a record.
    ///
    /// # Errors
    ///
    /// Returns a resource error if the record uses a different codebook.
    pub fn push(&mut self, record: SymptomVector) -> Result<()> {
        if record.codebook() != &self.codebook {
            return Err(Error::resource(format!(
                "record {} was built against a different symptom list",
                record.id()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in file order.
    #[must_use]
    pub fn records(&self) -> &[SymptomVector] {
        &self.records
    }

    /// Consumes the set, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<SymptomVector> {
        self.records
    }

    /// The identifier column header.
    #[must_use]
    pub fn id_header(&self) -> &str {
        &self.id_header
    }

    /// Renders the set in record file layout.
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        let header: Vec<String> = std::iter::once(self.id_header.clone())
            .chain(self.codebook.codes().iter().map(ToString::to_string))
            .collect();
        tabular::write_line(&mut out, &header);
        for record in &self.records {
            tabular::write_line(&mut out, &record.to_fields());
        }
        out
    }

    /// Writes the set to a file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_csv_string()).map_err(|e| {
            Error::io(format!("failed to write records '{}': {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), records = self.len(), "wrote records");
        Ok(())
    }
}

fn check_header(table: &Tabular, codebook: &Codebook) -> Result<()> {
    let context = || {
        ErrorContext::new()
            .with_source(table.source.clone())
            .with_line(1)
    };
    if table.headers.len() != codebook.len() + 1 {
        return Err(Error::resource(format!(
            "record header must have {} columns (ID plus {} symptoms), found {}",
            codebook.len() + 1,
            codebook.len(),
            table.headers.len()
        ))
        .with_context(context()));
    }
    for ((position, code), header) in codebook.iter().zip(&table.headers[1..]) {
        if header.trim() != code.as_str() {
            return Err(Error::resource(format!(
                "record column {position} is '{header}', expected {code}"
            ))
            .with_context(context().with_column(header.clone())));
        }
    }
    Ok(())
}
