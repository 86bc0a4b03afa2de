//! 日志宏统一出口。
//! 嵌入式构建启用 `defmt` 特性时使用 defmt，否则走 `log` 门面。

#[cfg(all(feature = "defmt", not(feature = "simulator")))]
pub use defmt::{debug, error, info, trace, warn};

#[cfg(not(all(feature = "defmt", not(feature = "simulator"))))]
pub use log::{debug, error, info, trace, warn};
