//! Application constants for the hydrological archive importer
//!
//! Archive layout, filename conventions, file-content markers and
//! database table names shared across the importer.

// =============================================================================
// Archive Layout
// =============================================================================

/// Top-level archive directory holding groundwater level files
pub const WATER_PREFIX: &str = "grundwasser-gwo/";

/// Top-level archive directory holding precipitation files
pub const RAIN_PREFIX: &str = "meteo-n/";

/// Category token for groundwater data (the prefix without its slash)
pub const WATER_TOKEN: &str = "grundwasser-gwo";

/// Category token for precipitation data
pub const RAIN_TOKEN: &str = "meteo-n";

/// Leading station id inside an entry name, e.g. `grundwasser-gwo/100_...`
pub const STATION_ID_PATTERN: &str = r"/(?P<number>\d+)_";

// =============================================================================
// Filename Conventions
// =============================================================================

/// Files generated on the download day; partial data, always skipped
pub const TODAY_PATTERN: &str = r"^(?P<type>grundwasser-gwo|meteo-n)/(?P<station>\d+)_(?P<date>\d\d\.\d\d\.\d\d\d\d)_\D+.*\.csv";

/// Complete history up to a given date
pub const FULL_HISTORY_PATTERN: &str = r"^(?P<type>grundwasser-gwo|meteo-n)/(?P<station>\d+)_beginn_bis_(?P<date>\d\d\.\d\d\.\d\d\d\d)_.*\.csv";

/// Data between two explicit dates (usually start of year to download day)
pub const YEAR_TO_DATE_PATTERN: &str = r"^(?P<type>grundwasser-gwo|meteo-n)/(?P<station>\d+)_(?P<start_date>\d\d\.\d\d\.\d\d\d\d)_(?P<end_date>\d\d\.\d\d\.\d\d\d\d)_.*\.csv";

// =============================================================================
// File Content Markers
// =============================================================================

/// Preamble line carrying the station display name
pub const STATION_NAME_PATTERN: &str = r"^Messstellen-Name.;(?P<name>.*)";

/// Header row preceding the data section
pub const HEADER_PATTERN: &str = r"^Datum;.*;Prüfstatus";

/// Field separator used in the source CSV files
pub const FIELD_SEPARATOR: char = ';';

/// Decimal separator used in the source CSV files
pub const SOURCE_DECIMAL_SEPARATOR: char = ',';

// =============================================================================
// Database Tables
// =============================================================================

pub const WATER_DATA_TABLE: &str = "water_data";
pub const WATER_STATIONS_TABLE: &str = "water_stations";
pub const RAIN_DATA_TABLE: &str = "rain_data";
pub const RAIN_STATIONS_TABLE: &str = "rain_stations";

/// Primary key column of both data tables
pub const DATE_COLUMN: &str = "date";

/// Suffix appended to the database path for the single backup slot
pub const BACKUP_SUFFIX: &str = ".bak";

// =============================================================================
// Progress Display
// =============================================================================

pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";
pub const PROGRESS_CHARS: &str = "#>-";
