// chrono/time switch, jiff and std are always built
#[cfg(feature = "with-chrono")]
pub mod tm_chrono;

#[cfg(feature = "with-time")]
pub mod tm_time;

pub mod tm_jiff;
pub mod tm_std;

use anyhow::Result;

use crate::common::{DateReport, Library, Settings};

/// Run one library's probe. The probes share nothing but `settings`.
pub fn run_probe(library: Library, settings: &Settings) -> Result<DateReport> {
    log::debug!("probe {} start, zone {}, locale {}", library, settings.zone, settings.locale);
    match library {
        #[cfg(feature = "with-chrono")]
        Library::Chrono => tm_chrono::run(settings),
        #[cfg(not(feature = "with-chrono"))]
        Library::Chrono => Err(anyhow::anyhow!("built without feature \"with-chrono\"")),

        #[cfg(feature = "with-time")]
        Library::Time => tm_time::run(settings),
        #[cfg(not(feature = "with-time"))]
        Library::Time => Err(anyhow::anyhow!("built without feature \"with-time\"")),

        Library::Jiff => tm_jiff::run(settings),
        Library::Std => tm_std::run(settings),
    }
}
