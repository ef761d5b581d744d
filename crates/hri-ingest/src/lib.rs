pub mod coerce;
pub mod decode;
pub mod loader;
pub mod profile;

pub use coerce::{
    DATE_FORMATS, NUMERIC_THRESHOLD, SAMPLE_SIZE, coerce_column, coerce_table, date_shape_ratio,
    detect_date_format, parse_numeric,
};
pub use decode::decode_text;
pub use loader::{FileInfo, FileKind, LoadedFile, detect_kind, load_file, parse_csv_text};
pub use profile::build_column_profiles;
