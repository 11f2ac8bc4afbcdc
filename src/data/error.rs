#[derive(Debug)]
pub enum DataLoadError {
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    MissingGeometry(String),
    DuplicateRegion(String),
}

impl From<std::io::Error> for DataLoadError {
    fn from(err: std::io::Error) -> Self {
        DataLoadError::IoError(err)
    }
}

impl From<csv::Error> for DataLoadError {
    fn from(err: csv::Error) -> Self {
        DataLoadError::CsvError(err)
    }
}

impl From<serde_json::Error> for DataLoadError {
    fn from(err: serde_json::Error) -> Self {
        DataLoadError::JsonError(err)
    }
}

impl std::fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLoadError::IoError(e) => write!(f, "IO error: {}", e),
            DataLoadError::CsvError(e) => write!(f, "CSV error: {}", e),
            DataLoadError::JsonError(e) => write!(f, "JSON error: {}", e),
            DataLoadError::MissingGeometry(name) => write!(f, "Region {} has neither a point nor a polygon", name),
            DataLoadError::DuplicateRegion(name) => write!(f, "Region {} appears more than once", name),
        }
    }
}

impl std::error::Error for DataLoadError {}
