use anyhow::Result;

use datecompare::{Library, Locale, Settings, run_probe};

// cargo run --example ex1
fn main() -> Result<()> {
    let settings = Settings {
        locale: Locale::En,
        zone: "Asia/Shanghai".to_owned(),
        ..Settings::default()
    };

    for lib in Library::built() {
        let report = run_probe(lib, &settings)?;
        println!("{:>6}: {}", lib, report.zoned);
    }

    Ok(())
}
