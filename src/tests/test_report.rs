#[cfg(test)]
mod tests {
    use anyhow::Result;
    use std::time::Duration;

    use crate::common::*;
    use crate::report::*;

    fn sample() -> DateReport {
        DateReport {
            library: Library::Time,
            hour: 14,
            next_week: "terça-feira, outubro 24, 2pm".to_owned(),
            zoned: "Tuesday, October 17, 12pm".to_owned(),
            is_before: false,
            is_leap_year: false,
            elapsed: Duration::from_micros(1_250),
        }
    }

    #[test]
    fn timing() {
        assert_eq!(timing_line(&sample()), "time Time: 1.250ms");
    }

    #[test]
    fn table_lines_are_aligned() {
        let text = render_table(&sample().rows());
        println!("{}", text);
        let lines: Vec<&str> = text.lines().collect();
        // top, header, separator, five rows, bottom
        assert_eq!(lines.len(), 9);
        let width = lines[0].chars().count();
        for line in &lines {
            assert_eq!(line.chars().count(), width, "{}", line);
        }
        assert!(lines[1].contains("(index)") && lines[1].contains("Values"));
        assert!(lines[4].contains("|time| nextWeek:"));
        assert!(lines[4].contains("terça-feira, outubro 24, 2pm"));
    }

    #[test]
    fn csv_output() -> Result<()> {
        let mut buf = Vec::new();
        write_reports(&mut buf, &[sample()], OutputFormat::Csv)?;
        let text = String::from_utf8(buf)?;
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("library,hour,next_week,zoned,is_before,is_leap_year,elapsed_us")
        );
        assert_eq!(
            lines.next(),
            Some("time,14,\"terça-feira, outubro 24, 2pm\",\"Tuesday, October 17, 12pm\",false,false,1250")
        );
        Ok(())
    }

    #[test]
    fn json_output() -> Result<()> {
        let mut buf = Vec::new();
        write_reports(&mut buf, &[sample()], OutputFormat::Json)?;
        let value: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(value[0]["library"], "time");
        assert_eq!(value[0]["hour"], 14);
        assert_eq!(value[0]["elapsed_us"], 1250);
        assert_eq!(value[0]["is_leap_year"], false);
        Ok(())
    }

    #[test]
    fn huge_elapsed_saturates() -> Result<()> {
        let report = DateReport {
            elapsed: Duration::MAX,
            ..sample()
        };
        let mut buf = Vec::new();
        write_json(&mut buf, &[report])?;
        let value: serde_json::Value = serde_json::from_slice(&buf)?;
        assert_eq!(value[0]["elapsed_us"], u64::MAX);
        Ok(())
    }

    #[test]
    fn table_output_has_timing() -> Result<()> {
        let mut buf = Vec::new();
        write_reports(&mut buf, &[sample()], OutputFormat::Table)?;
        let text = String::from_utf8(buf)?;
        assert!(text.starts_with("time Time: 1.250ms\n┌"));
        Ok(())
    }

    #[test]
    fn format_names() -> Result<()> {
        assert_eq!("JSON".parse::<OutputFormat>()?, OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>()?, OutputFormat::Table);
        assert!("xml".parse::<OutputFormat>().is_err());
        Ok(())
    }
}
