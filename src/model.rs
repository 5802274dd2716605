use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use derive_setters::Setters;
use polars::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use pageable::domain::{PageableError, Row, Value};
use pageable::paginator::Paginator;
use pageable::sorter::SortDirection;
use pageable::window::DEFAULT_WINDOW_SIZE;

#[derive(Debug)]
enum FileType {
    CSV,
    PARQUET,
    ARROW,
}

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct ViewerConfig {
    pub per_page: usize,
    pub window_size: usize,
    pub event_poll_time: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            per_page: 20,
            window_size: DEFAULT_WINDOW_SIZE,
            event_poll_time: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// 1-based position of a page button inside the visible window.
    PageButton(usize),
    NextColumn,
    PreviousColumn,
    SortSelected,
    SortAscending,
    SortDescending,
}

pub struct Model {
    config: ViewerConfig,
    pub status: Status,
    file_name: String,
    columns: Vec<String>,
    selected_column: usize,
    paginator: Paginator,
    status_message: String,
}

impl Model {
    pub fn load(path: PathBuf, config: &ViewerConfig) -> Result<Self, PageableError> {
        let file_type = Model::get_file_type(&path)?;
        let frame = match file_type {
            FileType::CSV => Model::load_csv(&path)?,
            FileType::PARQUET => Model::load_parquet(&path)?,
            FileType::ARROW => Model::load_arrow(&path)?,
        };

        let start_time = Instant::now();
        let df = frame.collect()?;
        let (columns, rows) = rows_from_frame(&df)?;
        let loading_duration = start_time.elapsed().as_millis();
        info!("Loading data took {loading_duration}ms ...");

        let nrows = rows.len();
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("???")
            .to_string();

        Ok(Self {
            config: config.clone(),
            status: Status::READY,
            file_name,
            columns,
            selected_column: 0,
            paginator: Paginator::with_data(rows, config.per_page),
            status_message: format!("Loaded {nrows} rows in {loading_duration}ms"),
        })
    }

    pub fn update(&mut self, message: Message) {
        trace!("Update: {message:?}");
        match message {
            Message::Quit => self.quit(),
            Message::NextPage => self.paginator.next_page(),
            Message::PreviousPage => self.paginator.previous_page(),
            Message::FirstPage => self.paginator.go_to_page(1),
            Message::LastPage => {
                let last = self.paginator.total_pages();
                self.paginator.go_to_page(last);
            }
            Message::PageButton(n) => self.press_page_button(n),
            Message::NextColumn => self.select_next_column(),
            Message::PreviousColumn => self.select_previous_column(),
            Message::SortSelected => self.sort_selected(None),
            Message::SortAscending => self.sort_selected(Some(SortDirection::Ascending)),
            Message::SortDescending => self.sort_selected(Some(SortDirection::Descending)),
        }
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    /// Sorts by a column name, used for the --sort-by startup option.
    pub fn sort_by_column(&mut self, field: &str) -> Result<(), PageableError> {
        let Some(idx) = self.columns.iter().position(|c| c == field) else {
            return Err(PageableError::UnknownColumn(field.to_string()));
        };
        self.selected_column = idx;
        self.paginator.sort_by_property(field, None)
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    // -------------------- Control handling functions ---------------------- //

    fn press_page_button(&mut self, n: usize) {
        let window = self.paginator.pages(self.config.window_size);
        if let Some(slot) = n.checked_sub(1)
            && let Some(&page) = window.get(slot)
        {
            self.paginator.go_to_page(page);
        }
    }

    fn select_next_column(&mut self) {
        if self.selected_column + 1 < self.columns.len() {
            self.selected_column += 1;
        }
    }

    fn select_previous_column(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    fn sort_selected(&mut self, direction: Option<SortDirection>) {
        let Some(field) = self.columns.get(self.selected_column).cloned() else {
            return;
        };
        match self.paginator.sort_by_property(&field, direction) {
            Ok(()) => {
                let direction = self.paginator.sort_direction();
                self.set_status_message(format!("Sorted by {field} ({direction:?})"));
            }
            Err(e) => self.set_status_message(format!("Cannot sort by {field}: {e}")),
        }
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    // ------------------------- Data loading ------------------------------- //

    fn get_file_type(path: &Path) -> Result<FileType, PageableError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PageableError::FileNotFound,
            ErrorKind::PermissionDenied => PageableError::PermissionDenied,
            _ => PageableError::IoError(e),
        })?;
        if !metadata.is_file() {
            return Err(PageableError::LoadingFailed("Not a file!".into()));
        }
        Model::detect_file_type(path)
    }

    fn detect_file_type(path: &Path) -> Result<FileType, PageableError> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_uppercase())
            .as_deref()
        {
            Some("CSV") => Ok(FileType::CSV),
            Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
            Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
            _ => Err(PageableError::UnknownFileType),
        }
    }

    fn load_csv(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
        LazyCsvReader::new(PlPath::Local(path.as_path().into()))
            .with_has_header(true)
            .finish()
    }

    fn load_parquet(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
        LazyFrame::scan_parquet(
            PlPath::Local(path.as_path().into()),
            ScanArgsParquet::default(),
        )
    }

    fn load_arrow(path: &PathBuf) -> Result<LazyFrame, PolarsError> {
        LazyFrame::scan_ipc(
            PlPath::Local(path.as_path().into()),
            polars::io::ipc::IpcScanOptions,
            UnifiedScanArgs::default(),
        )
    }
}

fn is_numeric_type(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Converts one dataframe column to typed cell values.
fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Value>, PolarsError> {
    let column = df.column(name)?;
    let dtype = column.dtype().clone();

    let values = if is_numeric_type(&dtype) {
        let col = column.cast(&DataType::Float64)?;
        col.f64()?
            .into_iter()
            .map(|v| v.map(Value::Number).unwrap_or(Value::Null))
            .collect()
    } else if dtype == DataType::Boolean {
        column
            .bool()?
            .into_iter()
            .map(|v| v.map(Value::Bool).unwrap_or(Value::Null))
            .collect()
    } else {
        let col = column.cast(&DataType::String)?;
        col.str()?
            .into_iter()
            .map(|v| v.map(|s| Value::Text(s.to_string())).unwrap_or(Value::Null))
            .collect()
    };

    Ok(values)
}

/// Converts a collected dataframe to the row-major dataset the paginator
/// holds. Each column is converted in its own thread.
fn rows_from_frame(df: &DataFrame) -> Result<(Vec<String>, Vec<Row>), PageableError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let c_: Result<Vec<Vec<Value>>, PolarsError> = names
        .par_iter()
        .map(|name| column_values(df, name))
        .collect();
    let columns = c_?;
    for (name, values) in names.iter().zip(columns.iter()) {
        debug!("Column \"{name}\": {} values", values.len());
    }

    let mut rows = Vec::with_capacity(df.height());
    for ridx in 0..df.height() {
        let mut row = Row::with_capacity(names.len());
        for (cidx, name) in names.iter().enumerate() {
            row.insert(name.clone(), columns[cidx][ridx].clone());
        }
        rows.push(row);
    }

    Ok((names, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn frame_columns_map_to_typed_values() {
        let frame = df!(
            "name" => ["Ann", "Bob"],
            "age" => [34i64, 28],
            "active" => [true, false]
        )
        .unwrap();

        let (names, rows) = rows_from_frame(&frame).unwrap();
        assert_eq!(names, vec!["name", "age", "active"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], Value::Text("Ann".to_string()));
        assert_eq!(rows[0]["age"], Value::Number(34.0));
        assert_eq!(rows[0]["active"], Value::Bool(true));
        assert_eq!(rows[1]["active"], Value::Bool(false));
    }

    #[test]
    fn missing_cells_become_null() {
        let frame = df!(
            "x" => [Some(1i64), None]
        )
        .unwrap();

        let (_, rows) = rows_from_frame(&frame).unwrap();
        assert_eq!(rows[0]["x"], Value::Number(1.0));
        assert_eq!(rows[1]["x"], Value::Null);
    }

    #[test]
    fn file_type_is_detected_by_extension() {
        assert!(matches!(
            Model::detect_file_type(Path::new("data.csv")),
            Ok(FileType::CSV)
        ));
        assert!(matches!(
            Model::detect_file_type(Path::new("data.PQ")),
            Ok(FileType::PARQUET)
        ));
        assert!(matches!(
            Model::detect_file_type(Path::new("data.feather")),
            Ok(FileType::ARROW)
        ));
        assert!(matches!(
            Model::detect_file_type(Path::new("data.xyz")),
            Err(PageableError::UnknownFileType)
        ));
    }
}
