pub const MIB: u64 = 1024 * 1024;

pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human-readable size with two decimals above one KiB, e.g. `12.50 MB`.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let mut scaled = size as f64;
        let mut unit = 0;

        while scaled >= 1024.0 && unit < UNITS.len() - 1 {
            scaled /= 1024.0;
            unit += 1;
        }

        if unit == 0 {
            format!("{} {}", size, UNITS[0])
        } else {
            format!("{:.2} {}", scaled, UNITS[unit])
        }
    }

    /// Upload limits are whole mebibytes; render them without decimals.
    pub fn format_limit(limit: u64) -> String {
        if limit % MIB == 0 {
            format!("{}MB", limit / MIB)
        } else {
            Self::format_size(limit)
        }
    }
}
