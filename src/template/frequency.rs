use super::*;
use itertools::Itertools as _;
use std::io::BufRead;

/// A distinct template with its corpus frequency; ids start at 1.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RankedTemplate {
    pub template_id: usize,
    pub canonical_sql: String,
    pub count: u64,
}

/// Counts how often each distinct template occurs.
#[derive(Debug, Clone, Default)]
pub struct TemplateCounter {
    counts: HashMap<String, u64>,
}

impl TemplateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence; surrounding whitespace is ignored and blank
    /// templates are not counted.
    pub fn observe(&mut self, template: &str) {
        let template = template.trim();
        if template.is_empty() {
            return;
        }
        *self.counts.entry(template.to_string()).or_default() += 1;
    }

    /// Count the `field` of every JSON-lines record; returns the number of
    /// records read. Records without the field count as blank.
    pub fn observe_records(&mut self, reader: impl BufRead, field: &str) -> Result<usize> {
        let mut records = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: serde_json::Value = serde_json::from_str(&line)?;
            self.observe(record.get(field).and_then(|v| v.as_str()).unwrap_or_default());
            records += 1;
        }
        debug!(
            "Read {records} records, {} distinct templates",
            self.distinct()
        );
        Ok(records)
    }

    pub fn count(&self, template: &str) -> u64 {
        self.counts.get(template.trim()).copied().unwrap_or_default()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Templates by descending count, ties broken by template text.
    pub fn ranked(&self) -> Vec<RankedTemplate> {
        self.counts
            .iter()
            .sorted_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
            .enumerate()
            .map(|(i, (template, &count))| RankedTemplate {
                template_id: i + 1,
                canonical_sql: template.clone(),
                count,
            })
            .collect()
    }
}

impl<S: AsRef<str>> Extend<S> for TemplateCounter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for template in iter {
            self.observe(template.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TemplateCounter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}
