//! Programmatic rule table construction.
//!
//! The probbase loader goes through the same builder, so a table assembled
//! in code is validated exactly like one read from a file.

use std::collections::HashSet;
use std::sync::Arc;

use vacheck_foundation::{Error, ErrorContext, Polarity, Result, SymptomCode};

use crate::codebook::Codebook;
use crate::row::{AskIfRule, DontAskRule, MAX_DONT_ASK, NeonateOnlyRule, PriorRow, RuleRef, RuleRow};
use crate::table::RuleTable;

// =============================================================================
// Symptom Spec
// =============================================================================

/// Unresolved description of one rule row.
///
/// Codes are kept as text until [`RuleTableBuilder::build`] resolves them.
#[derive(Clone, Debug, Default)]
pub struct SymptomSpec {
    /// Symptom code.
    pub code: String,
    /// Short description.
    pub short_desc: String,
    /// Long description.
    pub long_desc: String,
    /// Who is asked.
    pub who: String,
    /// Trigger direction (`Y` is present).
    pub subst: Option<Polarity>,
    /// Dependency rules as `(code, polarity)`.
    pub dont_ask: Vec<(String, Polarity)>,
    /// Inference rule as `(code, polarity)`.
    pub ask_if: Option<(String, Polarity)>,
    /// Neonate indicator code.
    pub neonate_only: Option<String>,
    /// Where the row came from, for error reporting.
    pub origin: Option<ErrorContext>,
}

impl SymptomSpec {
    /// Creates a spec with the given code and trigger direction.
    #[must_use]
    pub fn new(code: impl Into<String>, subst: Polarity) -> Self {
        Self {
            code: code.into(),
            subst: Some(subst),
            ..Self::default()
        }
    }

    /// Sets the three descriptions.
    #[must_use]
    pub fn with_descriptions(
        mut self,
        short_desc: impl Into<String>,
        long_desc: impl Into<String>,
        who: impl Into<String>,
    ) -> Self {
        self.short_desc = short_desc.into();
        self.long_desc = long_desc.into();
        self.who = who.into();
        self
    }

    /// Adds a dependency rule.
    #[must_use]
    pub fn dont_ask(mut self, code: impl Into<String>, polarity: Polarity) -> Self {
        self.dont_ask.push((code.into(), polarity));
        self
    }

    /// Sets the inference rule.
    #[must_use]
    pub fn ask_if(mut self, code: impl Into<String>, polarity: Polarity) -> Self {
        self.ask_if = Some((code.into(), polarity));
        self
    }

    /// Sets the neonate restriction.
    #[must_use]
    pub fn neonate_only(mut self, code: impl Into<String>) -> Self {
        self.neonate_only = Some(code.into());
        self
    }

    /// Records where this row came from.
    #[must_use]
    pub fn with_origin(mut self, origin: ErrorContext) -> Self {
        self.origin = Some(origin);
        self
    }

    fn error(&self, message: String) -> Error {
        let err = Error::resource(message);
        match &self.origin {
            Some(ctx) => err.with_context(ctx.clone()),
            None => err,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Assembles and validates a [`RuleTable`].
#[derive(Clone, Debug, Default)]
pub struct RuleTableBuilder {
    prior: PriorRow,
    symptoms: Vec<SymptomSpec>,
}

impl RuleTableBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prior row descriptions.
    #[must_use]
    pub fn prior(mut self, prior: PriorRow) -> Self {
        self.prior = prior;
        self
    }

    /// Appends the next symptom row.
    #[must_use]
    pub fn symptom(mut self, spec: SymptomSpec) -> Self {
        self.symptoms.push(spec);
        self
    }

    /// Appends a symptom row in place.
    pub fn push(&mut self, spec: SymptomSpec) {
        self.symptoms.push(spec);
    }

    /// Number of symptom rows added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    /// Returns true if no symptom rows were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// Resolves every code and builds the table.
    ///
    /// # Errors
    ///
    /// Returns a resource error if there are no symptoms, a code is malformed
    /// or duplicated, a trigger direction is missing, a row declares more than
    /// [`MAX_DONT_ASK`] dependency rules, or a rule references a code with no
    /// row.
    pub fn build(self) -> Result<RuleTable> {
        if self.symptoms.is_empty() {
            return Err(Error::resource("rule table has no symptom rows"));
        }

        let mut codes = Vec::with_capacity(self.symptoms.len());
        let mut seen = HashSet::with_capacity(self.symptoms.len());
        for spec in &self.symptoms {
            let code = SymptomCode::parse(spec.code.trim())
                .map_err(|e| spec.error(format!("{}", e.kind)))?;
            if !seen.insert(code) {
                return Err(spec.error(format!("symptom code {code} appears more than once")));
            }
            codes.push(code);
        }
        let codebook = Codebook::new(codes)?;

        let resolve = |spec: &SymptomSpec, field: &str, text: &str| -> Result<RuleRef> {
            let code = SymptomCode::parse(text.trim())
                .map_err(|e| spec.error(format!("{field}: {}", e.kind)))?;
            let position = codebook.position(code).ok_or_else(|| {
                spec.error(format!(
                    "{field} on {} references unknown symptom {code}",
                    spec.code.trim()
                ))
            })?;
            Ok(RuleRef { code, position })
        };

        let mut rows = Vec::with_capacity(self.symptoms.len());
        for (spec, (position, code)) in self.symptoms.iter().zip(codebook.iter()) {
            let subst = spec
                .subst
                .ok_or_else(|| spec.error(format!("{code} has no trigger direction")))?;

            if spec.dont_ask.len() > MAX_DONT_ASK {
                return Err(spec.error(format!(
                    "{code} declares {} dependency rules, at most {MAX_DONT_ASK} allowed",
                    spec.dont_ask.len()
                )));
            }

            let dont_ask = spec
                .dont_ask
                .iter()
                .map(|(dep, polarity)| {
                    Ok::<_, Error>(DontAskRule {
                        dependent: resolve(spec, "dontask", dep)?,
                        polarity: *polarity,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let ask_if = spec
                .ask_if
                .as_ref()
                .map(|(dep, polarity)| {
                    Ok::<_, Error>(AskIfRule {
                        dependent: resolve(spec, "askif", dep)?,
                        polarity: *polarity,
                    })
                })
                .transpose()?;

            let neonate_only = spec
                .neonate_only
                .as_deref()
                .map(|ind| {
                    Ok::<_, Error>(NeonateOnlyRule {
                        indicator: resolve(spec, "nnonly", ind)?,
                    })
                })
                .transpose()?;

            rows.push(RuleRow {
                position,
                code,
                short_desc: spec.short_desc.clone(),
                long_desc: spec.long_desc.clone(),
                who: spec.who.clone(),
                subst: subst.observation(),
                dont_ask,
                ask_if,
                neonate_only,
            });
        }

        Ok(RuleTable::from_parts(self.prior, rows, Arc::new(codebook)))
    }
}
