pub mod civil;
pub mod common;
pub mod locale;
pub mod probes;
pub mod report;

use anyhow::Result;

pub use crate::common::*;
pub use crate::locale::Locale;
pub use crate::probes::run_probe;
pub use crate::report::OutputFormat;

#[cfg(test)]
mod tests;

/// run the requested probes one after another, always in `Library::ALL` order.
///
/// 每个probe独立运行, 一个失败不影响其它的
pub fn run_all(libraries: &[Library], settings: &Settings) -> Vec<(Library, Result<DateReport>)> {
    let mut selected: Vec<Library> = libraries.to_vec();
    selected.sort();
    selected.dedup();
    selected
        .into_iter()
        .map(|lib| {
            let res = run_probe(lib, settings);
            match &res {
                Ok(report) => log::info!("{} finished in {:.3}ms", lib, report.elapsed_millis()),
                Err(e) => log::error!("{} failed: {:#}", lib, e),
            }
            (lib, res)
        })
        .collect()
}
