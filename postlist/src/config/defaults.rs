//! Default configuration values for postlist

/// Default MySQL host
pub const HOST: &str = "localhost";

/// Default MySQL port
pub const PORT: u16 = 3306;

/// Default database name
pub const DATABASE: &str = "blogdb";

/// Default database user
pub const USER: &str = "root";

/// Default connection charset
pub const CHARSET: &str = "utf8mb4";

/// Posts shown per page
pub const PAGE_SIZE: u64 = 5;

/// Default HTTP listen address
pub const BIND_ADDR: &str = "127.0.0.1:8080";
