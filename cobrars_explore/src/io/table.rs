//! Tables of metabolite and reaction attributes, with export to delimited text files
use std::env;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::configuration;
use crate::metabolic_model::model::Model;

/// A row of a [`Table`], serialized in the order of [`TableRow::COLUMNS`]
pub trait TableRow: Serialize {
    /// Column headers of the table
    const COLUMNS: &'static [&'static str];
}

/// Attributes of a metabolite in the model
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetaboliteRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Compartment")]
    pub compartment: Option<String>,
    #[serde(rename = "Formula")]
    pub formula: Option<String>,
}

impl TableRow for MetaboliteRecord {
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Compartment", "Formula"];
}

/// Attributes of a metabolite taking part in a reaction, along with its stoichiometric coefficient
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReactionMetaboliteRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Compartment")]
    pub compartment: Option<String>,
    #[serde(rename = "Formula")]
    pub formula: Option<String>,
    #[serde(rename = "Coefficient")]
    pub coefficient: f64,
}

impl TableRow for ReactionMetaboliteRecord {
    const COLUMNS: &'static [&'static str] =
        &["ID", "Name", "Compartment", "Formula", "Coefficient"];
}

/// An in memory, row oriented table
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R: TableRow> {
    rows: Vec<R>,
}

impl<R: TableRow> Table<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table to a delimited text file
    ///
    /// The header row is always written, missing values are written as empty fields.
    pub fn write_delimited<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: u8,
    ) -> Result<(), TableError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_path(path.as_ref())?;
        writer.write_record(R::COLUMNS)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        info!(
            path = %path.as_ref().display(),
            rows = self.rows.len(),
            "wrote table"
        );
        Ok(())
    }
}

/// Where, and whether, to save an exported table
#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(setter(into))]
pub struct ExportOptions {
    /// Whether to write the table to a file
    #[builder(default = "true")]
    pub save: bool,
    /// File to write to, defaults to the configured file name in the current directory
    #[builder(default = "None")]
    pub path: Option<PathBuf>,
    /// Field delimiter
    #[builder(default = "configuration::current().delimiter")]
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            save: true,
            path: None,
            delimiter: configuration::current().delimiter,
        }
    }
}

impl ExportOptions {
    /// Options which only build the table, without writing it to a file
    pub fn no_save() -> Self {
        Self {
            save: false,
            ..Self::default()
        }
    }

    /// Resolve the output path, falling back to `default_name` in the current directory
    fn resolve_path(&self, default_name: &str) -> Result<PathBuf, TableError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(env::current_dir()?.join(default_name)),
        }
    }

    fn save_table<R: TableRow>(
        &self,
        table: &Table<R>,
        default_name: &str,
    ) -> Result<(), TableError> {
        if self.save {
            table.write_delimited(self.resolve_path(default_name)?, self.delimiter)?;
        }
        Ok(())
    }
}

/// Build a table of the model's metabolites, with columns ID, Name, Compartment and Formula
///
/// If `options.save` is set, the table is also written to `options.path` (by default
/// `metabolite_df.csv` in the current directory). The table is returned either way.
///
/// # Examples
/// ```rust
/// use cobrars_explore::io::table::{metabolite_data, ExportOptions};
/// use cobrars_explore::metabolic_model::metabolite::Metabolite;
/// use cobrars_explore::metabolic_model::model::Model;
/// let mut model = Model::new_empty();
/// model.add_metabolite(Metabolite::new_id_only("h_c")).unwrap();
/// let table = metabolite_data(&model, &ExportOptions::no_save()).unwrap();
/// assert_eq!(table.rows()[0].id, "h_c");
/// ```
pub fn metabolite_data(
    model: &Model,
    options: &ExportOptions,
) -> Result<Table<MetaboliteRecord>, TableError> {
    let rows = model
        .metabolites()
        .map(|met| MetaboliteRecord {
            id: met.id.clone(),
            name: met.name.clone(),
            compartment: met.compartment.clone(),
            formula: met.formula.clone(),
        })
        .collect();
    let table = Table::new(rows);
    options.save_table(&table, &configuration::current().metabolite_table_name)?;
    Ok(table)
}

/// Build a table of the metabolites taking part in a reaction
///
/// Columns are ID, Name, Compartment, Formula and Coefficient (the stoichiometric coefficient
/// of the metabolite in the reaction). If `options.save` is set, the table is also written
/// to `options.path` (by default `reaction_df.csv` in the current directory).
pub fn reaction_data(
    model: &Model,
    reaction_id: &str,
    options: &ExportOptions,
) -> Result<Table<ReactionMetaboliteRecord>, TableError> {
    let reaction = model
        .reaction(reaction_id)
        .map_err(|_| TableError::ReactionNotFound(reaction_id.to_string()))?;
    let rows = reaction
        .metabolites
        .iter()
        .map(|(met_id, coefficient)| -> Result<ReactionMetaboliteRecord, TableError> {
            let met = model
                .metabolite(met_id)
                .map_err(|_| TableError::MetaboliteNotFound(met_id.clone()))?;
            Ok(ReactionMetaboliteRecord {
                id: met.id.clone(),
                name: met.name.clone(),
                compartment: met.compartment.clone(),
                formula: met.formula.clone(),
                coefficient: *coefficient,
            })
        })
        .collect::<Result<Vec<_>, TableError>>()?;
    let table = Table::new(rows);
    options.save_table(&table, &configuration::current().reaction_table_name)?;
    Ok(table)
}

/// Errors associated with building and exporting tables
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Reaction {0} is not present in the model")]
    ReactionNotFound(String),
    #[error("Metabolite {0} is not present in the model")]
    MetaboliteNotFound(String),
    #[error("Unable to write delimited file")]
    Csv(#[from] csv::Error),
    #[error("Unable to write to file")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::{Metabolite, MetaboliteBuilder};
    use crate::metabolic_model::reaction::ReactionBuilder;
    use indexmap::IndexMap;
    use std::fs;
    use tempfile::tempdir;

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model
            .add_metabolite(
                MetaboliteBuilder::default()
                    .id("glc__D_e".to_string())
                    .name(Some("D-Glucose".to_string()))
                    .compartment(Some("e".to_string()))
                    .formula(Some("C6H12O6".to_string()))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        model
            .add_metabolite(
                MetaboliteBuilder::default()
                    .id("glc__D_c".to_string())
                    .name(Some("D-Glucose".to_string()))
                    .compartment(Some("c".to_string()))
                    .formula(Some("C6H12O6".to_string()))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        model
            .add_metabolite(Metabolite::new_id_only("h_c"))
            .unwrap();
        let mut stoich = IndexMap::new();
        stoich.insert("glc__D_e".to_string(), -1.0);
        stoich.insert("glc__D_c".to_string(), 1.0);
        stoich.insert("h_c".to_string(), 0.5);
        model
            .add_reaction(
                ReactionBuilder::default()
                    .id("GLCt".to_string())
                    .metabolites(stoich)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        model
            .add_reaction(ReactionBuilder::default().id("EMPTY".to_string()).build().unwrap())
            .unwrap();
        model
    }

    #[test]
    fn metabolite_table() {
        let model = setup_model();
        let table = metabolite_data(&model, &ExportOptions::no_save()).unwrap();
        assert_eq!(table.columns(), &["ID", "Name", "Compartment", "Formula"]);
        assert_eq!(table.len(), 3);
        let first = &table.rows()[0];
        assert_eq!(first.id, "glc__D_e");
        assert_eq!(first.name.as_deref(), Some("D-Glucose"));
        assert_eq!(first.compartment.as_deref(), Some("e"));
        assert_eq!(first.formula.as_deref(), Some("C6H12O6"));
        assert_eq!(table.rows()[2].formula, None);
    }

    #[test]
    fn reaction_table() {
        let model = setup_model();
        let table = reaction_data(&model, "GLCt", &ExportOptions::no_save()).unwrap();
        assert_eq!(table.columns().last(), Some(&"Coefficient"));
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["glc__D_e", "glc__D_c", "h_c"]);
        assert!((table.rows()[0].coefficient + 1.0).abs() < 1e-25);
        assert!((table.rows()[2].coefficient - 0.5).abs() < 1e-25);

        match reaction_data(&model, "PFK", &ExportOptions::no_save()) {
            Err(TableError::ReactionNotFound(id)) => assert_eq!(id, "PFK"),
            _ => panic!("Missing reaction not caught"),
        }
    }

    #[test]
    fn write_metabolite_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metabolites.csv");
        let model = setup_model();
        let options = ExportOptionsBuilder::default()
            .path(Some(path.clone()))
            .build()
            .unwrap();
        let table = metabolite_data(&model, &options).unwrap();
        assert_eq!(table.len(), 3);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "ID,Name,Compartment,Formula");
        assert_eq!(lines[1], "glc__D_e,D-Glucose,e,C6H12O6");
        assert_eq!(lines[3], "h_c,,,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn write_reaction_table_tab_delimited() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reaction.tsv");
        let model = setup_model();
        let options = ExportOptionsBuilder::default()
            .path(Some(path.clone()))
            .delimiter(b'\t')
            .build()
            .unwrap();
        reaction_data(&model, "GLCt", &options).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(&path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["ID", "Name", "Compartment", "Formula", "Coefficient"]
        );
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get(0), Some("glc__D_e"));
        let coef: f64 = records[0].get(4).unwrap().parse().unwrap();
        assert!((coef + 1.0).abs() < 1e-25);
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let model = setup_model();
        let options = ExportOptionsBuilder::default()
            .path(Some(path.clone()))
            .build()
            .unwrap();
        let table = reaction_data(&model, "EMPTY", &options).unwrap();
        assert!(table.is_empty());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "ID,Name,Compartment,Formula,Coefficient");
    }

    #[test]
    fn no_save_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unsaved.csv");
        let model = setup_model();
        let options = ExportOptionsBuilder::default()
            .save(false)
            .path(Some(path.clone()))
            .build()
            .unwrap();
        let table = metabolite_data(&model, &options).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!path.exists());
    }

    #[test]
    fn default_path_uses_configured_name() {
        let options = ExportOptions::default();
        assert!(options.save);
        assert_eq!(options.delimiter, b',');
        let name = configuration::current().metabolite_table_name;
        let resolved = options.resolve_path(&name).unwrap();
        assert_eq!(resolved.file_name().unwrap(), name.as_str());
        assert!(resolved.is_absolute());
    }
}
