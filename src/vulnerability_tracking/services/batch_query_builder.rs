use crate::vulnerability_tracking::domain::{BatchQuery, DependencyRecord, PackageQuery};

/// BatchQueryBuilder service for converting dependency records into a batch query
///
/// This is a pure, order-preserving transform: record `i` becomes query `i`
/// and name `i`. The name list is the correlation key the reconciler later
/// zips against the source's positional results.
pub struct BatchQueryBuilder;

impl BatchQueryBuilder {
    /// Builds the batch query and the parallel list of dependency names
    ///
    /// # Arguments
    /// * `records` - Validated dependency records in manifest order
    ///
    /// # Returns
    /// Tuple of (batch_query, dependency_names), both the same length as `records`
    pub fn build(records: &[DependencyRecord]) -> (BatchQuery, Vec<String>) {
        let queries = records
            .iter()
            .map(|record| PackageQuery::new(record.name(), record.version(), record.ecosystem()))
            .collect();
        let names = records
            .iter()
            .map(|record| record.name().to_string())
            .collect();

        (BatchQuery { queries }, names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, version: &str, ecosystem: &str) -> DependencyRecord {
        DependencyRecord::new(name.to_string(), version.to_string(), ecosystem.to_string())
            .unwrap()
    }

    #[test]
    fn test_build_preserves_order_and_length() {
        let records = vec![
            record("Flask", "2.0.0", "PyPI"),
            record("FastAPI", "0.95.0", "PyPI"),
            record("lodash", "4.17.20", "npm"),
        ];

        let (batch, names) = BatchQueryBuilder::build(&records);

        assert_eq!(batch.len(), records.len());
        assert_eq!(names.len(), records.len());
        assert_eq!(names, vec!["Flask", "FastAPI", "lodash"]);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(batch.queries[i].package.name, record.name());
            assert_eq!(batch.queries[i].version, record.version());
            assert_eq!(batch.queries[i].package.ecosystem, record.ecosystem());
        }
    }

    #[test]
    fn test_build_keeps_duplicates() {
        let records = vec![
            record("requests", "2.25.1", "PyPI"),
            record("requests", "2.31.0", "PyPI"),
        ];

        let (batch, names) = BatchQueryBuilder::build(&records);

        assert_eq!(batch.len(), 2);
        assert_eq!(names, vec!["requests", "requests"]);
        assert_eq!(batch.queries[1].version, "2.31.0");
    }

    #[test]
    fn test_build_empty() {
        let (batch, names) = BatchQueryBuilder::build(&[]);
        assert!(batch.is_empty());
        assert!(names.is_empty());
    }
}
