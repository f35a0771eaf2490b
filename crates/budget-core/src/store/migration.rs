//! Versioned schema migrations for record files.
//!
//! A record type whose on-disk layout changed carries a chain of steps, each
//! rewriting every line of the file from one version to the next. The running
//! version lives in the internal config under `"<kind>:version"`. No marker
//! means the file is already at the chain's terminal version.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use crate::codec::{FieldResult, Fields};
use crate::config::InternalConfig;
use crate::error::{BudgetError, Result};

use super::record::Record;
use super::record_store::write_data_file;

type Transform<'a> = Box<dyn Fn(&Path, Vec<Fields>) -> Result<Vec<Fields>> + 'a>;

/// One version-to-version rewrite of a whole record file.
pub struct MigrationStep<'a> {
    from: u32,
    to: u32,
    transform: Transform<'a>,
}

impl<'a> MigrationStep<'a> {
    /// A step that sees every record of the file at once.
    ///
    /// The closure receives the data file path for error reporting.
    pub fn new(
        from: u32,
        to: u32,
        transform: impl Fn(&Path, Vec<Fields>) -> Result<Vec<Fields>> + 'a,
    ) -> Self {
        Self {
            from,
            to,
            transform: Box::new(transform),
        }
    }

    /// A step that rewrites each record independently.
    pub fn per_record(
        from: u32,
        to: u32,
        transform: impl Fn(Fields) -> FieldResult<Fields> + 'a,
    ) -> Self {
        Self::new(from, to, move |path, records| {
            records
                .into_iter()
                .enumerate()
                .map(|(index, fields)| {
                    transform(fields).map_err(|e| BudgetError::decode(path, index + 1, e.0))
                })
                .collect()
        })
    }
}

impl fmt::Debug for MigrationStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Ordered migration steps for record type `T`.
pub struct MigrationChain<'a, T> {
    steps: Vec<MigrationStep<'a>>,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: Record> MigrationChain<'a, T> {
    /// A chain with no steps: the file must already be at `T::SCHEMA_VERSION`.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Append a step. Steps must be added in ascending order and must not
    /// go past the terminal version.
    pub fn step(mut self, step: MigrationStep<'a>) -> Result<Self> {
        if step.from >= step.to {
            return Err(BudgetError::Validation(format!(
                "{} migration {} -> {} does not move forward",
                T::KIND,
                step.from,
                step.to
            )));
        }
        if step.to > T::SCHEMA_VERSION {
            return Err(BudgetError::Validation(format!(
                "{} migration {} -> {} goes past schema version {}",
                T::KIND,
                step.from,
                step.to,
                T::SCHEMA_VERSION
            )));
        }
        if let Some(last) = self.steps.last() {
            if step.from < last.to {
                return Err(BudgetError::Validation(format!(
                    "{} migration {} -> {} is out of order after {} -> {}",
                    T::KIND,
                    step.from,
                    step.to,
                    last.from,
                    last.to
                )));
            }
        }
        self.steps.push(step);
        Ok(self)
    }

    pub fn marker_key() -> String {
        format!("{}:version", T::KIND)
    }

    /// The version recorded for `T`'s data file.
    pub fn current_version(&self, path: &Path, config: &InternalConfig) -> Result<u32> {
        let Some(raw) = config.get(&Self::marker_key()) else {
            return Ok(T::SCHEMA_VERSION);
        };
        let version: u32 = raw.trim().parse().map_err(|_| {
            BudgetError::decode(
                path,
                0,
                format!("invalid schema marker {}={}", Self::marker_key(), raw),
            )
        })?;
        if version > T::SCHEMA_VERSION {
            return Err(BudgetError::decode(
                path,
                0,
                format!(
                    "schema version {} is newer than supported version {}",
                    version,
                    T::SCHEMA_VERSION
                ),
            ));
        }
        Ok(version)
    }

    pub fn is_pending(&self, path: &Path, config: &InternalConfig) -> Result<bool> {
        Ok(self.current_version(path, config)? < T::SCHEMA_VERSION)
    }

    /// Bring `records` read from `path` up to the terminal version.
    ///
    /// After each step the data file is rewritten and the marker advanced
    /// (or removed at the terminal version) and the config saved, so a step
    /// never runs twice against the same file.
    pub fn run(
        &self,
        path: &Path,
        mut records: Vec<Fields>,
        config: &mut InternalConfig,
    ) -> Result<Vec<Fields>> {
        let mut version = self.current_version(path, config)?;
        while version < T::SCHEMA_VERSION {
            let step = self
                .steps
                .iter()
                .find(|step| step.from == version)
                .ok_or_else(|| {
                    BudgetError::decode(
                        path,
                        0,
                        format!(
                            "no {} migration from schema version {} (current is {})",
                            T::KIND,
                            version,
                            T::SCHEMA_VERSION
                        ),
                    )
                })?;

            tracing::info!(
                kind = T::KIND,
                from = step.from,
                to = step.to,
                records = records.len(),
                "migrating data file"
            );
            records = (step.transform)(path, records)?;
            write_data_file(path, &records)?;

            if step.to == T::SCHEMA_VERSION {
                config.remove(&Self::marker_key());
            } else {
                config.set(Self::marker_key(), step.to.to_string());
            }
            config.save()?;
            version = step.to;
        }
        Ok(records)
    }

    /// Settle the marker when there is no data file to migrate.
    pub fn settle_without_data(&self, config: &mut InternalConfig) {
        if config.remove(&Self::marker_key()).is_some() {
            tracing::debug!(kind = T::KIND, "cleared schema marker for missing data file");
        }
    }
}

impl<T: Record> Default for MigrationChain<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MigrationChain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationChain")
            .field("steps", &self.steps)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FieldError;
    use std::fs;
    use tempfile::tempdir;

    /// Version 3 layout: `id:label:weight`; v1 had `id`, v2 added `label`.
    #[derive(Debug, PartialEq)]
    struct Sample {
        id: u64,
        label: String,
        weight: u32,
    }

    impl Record for Sample {
        const KIND: &'static str = "sample";
        const FILE_NAME: &'static str = "samples.data";
        const SCHEMA_VERSION: u32 = 3;

        fn id(&self) -> u64 {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = id;
        }

        fn encode(&self) -> Fields {
            Fields::from_values(vec![
                self.id.to_string(),
                self.label.clone(),
                self.weight.to_string(),
            ])
        }

        fn decode(fields: &Fields) -> FieldResult<Self> {
            fields.expect_len(3)?;
            Ok(Self {
                id: fields.number(0)?,
                label: fields.text(1)?,
                weight: fields.number(2)?,
            })
        }
    }

    fn chain() -> MigrationChain<'static, Sample> {
        MigrationChain::new()
            .step(MigrationStep::per_record(1, 2, |mut fields| {
                fields.expect_len(1)?;
                fields.push("unnamed");
                Ok(fields)
            }))
            .unwrap()
            .step(MigrationStep::per_record(2, 3, |mut fields| {
                fields.expect_len(2)?;
                fields.push("1");
                Ok(fields)
            }))
            .unwrap()
    }

    #[test]
    fn test_absent_marker_means_current() {
        let config = InternalConfig::in_memory();
        let version = chain()
            .current_version(Path::new("samples.data"), &config)
            .unwrap();
        assert_eq!(version, 3);
    }

    #[test]
    fn test_runs_every_pending_step_and_clears_marker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.data");
        let mut config = InternalConfig::load(&dir.path().join("config.data")).unwrap();
        config.set("sample:version", "1");

        let records = vec![Fields::parse("4"), Fields::parse("9")];
        let migrated = chain().run(&path, records, &mut config).unwrap();

        assert_eq!(migrated[0].values(), ["4", "unnamed", "1"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "4:unnamed:1\n9:unnamed:1\n");
        assert!(!config.contains("sample:version"));
        assert!(!config.is_dirty());
    }

    #[test]
    fn test_starts_from_recorded_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.data");
        let mut config = InternalConfig::in_memory();
        config.set("sample:version", "2");

        let migrated = chain()
            .run(&path, vec![Fields::parse("4:kept")], &mut config)
            .unwrap();
        assert_eq!(migrated[0].values(), ["4", "kept", "1"]);
    }

    #[test]
    fn test_marker_past_terminal_is_rejected() {
        let mut config = InternalConfig::in_memory();
        config.set("sample:version", "7");
        let err = chain()
            .run(Path::new("samples.data"), Vec::new(), &mut config)
            .unwrap_err();
        assert!(matches!(err, BudgetError::Decode { .. }));
    }

    #[test]
    fn test_missing_step_is_rejected() {
        let mut config = InternalConfig::in_memory();
        config.set("sample:version", "1");
        let only_last: MigrationChain<'_, Sample> = MigrationChain::new()
            .step(MigrationStep::per_record(2, 3, Ok))
            .unwrap();
        let err = only_last
            .run(Path::new("samples.data"), Vec::new(), &mut config)
            .unwrap_err();
        assert!(err.to_string().contains("no sample migration from schema version 1"));
    }

    #[test]
    fn test_step_failure_reports_record_and_keeps_marker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("samples.data");
        let mut config = InternalConfig::in_memory();
        config.set("sample:version", "1");

        let err = chain()
            .run(&path, vec![Fields::parse("1"), Fields::parse("2:x")], &mut config)
            .unwrap_err();
        assert!(matches!(err, BudgetError::Decode { line: 2, .. }));
        assert_eq!(config.get("sample:version"), Some("1"));
        assert!(!path.exists());
    }

    #[test]
    fn test_builder_rejects_bad_ordering() {
        let backwards = MigrationChain::<Sample>::new().step(MigrationStep::per_record(2, 1, Ok));
        assert!(matches!(backwards, Err(BudgetError::Validation(_))));

        let past_terminal =
            MigrationChain::<Sample>::new().step(MigrationStep::per_record(3, 4, Ok));
        assert!(past_terminal.is_err());

        let out_of_order = MigrationChain::<Sample>::new()
            .step(MigrationStep::per_record(2, 3, Ok))
            .unwrap()
            .step(MigrationStep::per_record(1, 2, |_| {
                Err(FieldError("unused".to_string()))
            }));
        assert!(out_of_order.is_err());
    }
}
