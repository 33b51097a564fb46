use polars::prelude::*;
use student_etl_parser::StudentRecord;

/// All student rows gathered in one run, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnifiedTable {
    records: Vec<StudentRecord>,
}

impl UnifiedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudentRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, StudentRecord> {
        self.records.iter_mut()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.records.iter().map(|r| r.name.as_str()).collect();
        let heights: Vec<f64> = self.records.iter().map(|r| r.height).collect();
        let weights: Vec<f64> = self.records.iter().map(|r| r.weight).collect();

        DataFrame::new(vec![
            Series::new("Name".into(), names).into(),
            Series::new("Height".into(), heights).into(),
            Series::new("Weight".into(), weights).into(),
        ])
    }
}

impl Extend<StudentRecord> for UnifiedTable {
    fn extend<I: IntoIterator<Item = StudentRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<StudentRecord> for UnifiedTable {
    fn from_iter<I: IntoIterator<Item = StudentRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UnifiedTable {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataframe_mirrors_records() {
        let table: UnifiedTable = vec![
            StudentRecord::new("alex", 1.67, 51.25),
            StudentRecord::new("ajay", 1.82, 61.91),
        ]
        .into_iter()
        .collect();

        let df = table.to_dataframe().expect("dataframe");
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(columns, ["Name", "Height", "Weight"]);
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Name").unwrap().str().unwrap().get(1), Some("ajay"));
        assert_eq!(df.column("Weight").unwrap().f64().unwrap().get(0), Some(51.25));
    }

    #[test]
    fn empty_table_builds_empty_dataframe() {
        let df = UnifiedTable::new().to_dataframe().expect("dataframe");
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }
}
