//! Argument vectors for the staging binary.

use std::time::Duration;

use podrun_core::{DataReference, MetadataFormat, VariableMap};

use crate::error::Result;
use crate::interface::{serialize_interface, InterfaceSide};

/// Arguments for the init container that downloads inputs.
pub fn download_command_args(
    from_inputs_path: &DataReference,
    output_prefix: &DataReference,
    to_local_path: &str,
    format: MetadataFormat,
    input_interface: Option<&VariableMap>,
) -> Result<Vec<String>> {
    let encoded = serialize_interface(input_interface, InterfaceSide::Input)?;

    Ok(vec![
        "download".to_string(),
        "--from-remote".to_string(),
        from_inputs_path.to_string(),
        "--to-output-prefix".to_string(),
        output_prefix.to_string(),
        "--to-local-dir".to_string(),
        to_local_path.to_string(),
        "--format".to_string(),
        format.as_str_name().to_lowercase(),
        "--input-interface".to_string(),
        encoded,
    ])
}

/// Arguments for the sidecar that uploads outputs.
pub fn sidecar_command_args(
    from_local_path: &str,
    output_prefix: &DataReference,
    raw_output_path: &DataReference,
    start_timeout: Duration,
    output_interface: Option<&VariableMap>,
) -> Result<Vec<String>> {
    let encoded = serialize_interface(output_interface, InterfaceSide::Output)?;

    Ok(vec![
        "upload".to_string(),
        "--start-timeout".to_string(),
        format_duration(start_timeout),
        "--to-raw-output".to_string(),
        raw_output_path.to_string(),
        "--to-output-prefix".to_string(),
        output_prefix.to_string(),
        "--from-local-dir".to_string(),
        from_local_path.to_string(),
        "--output-interface".to_string(),
        encoded,
    ])
}

/// Render a duration the way the staging binary parses it
/// (`0s`, `250ms`, `1.5s`, `1m40s`, `2h0m0s`).
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < 1_000_000_000 {
        let (scale, unit) = match nanos {
            n if n < 1_000 => (1, "ns"),
            n if n < 1_000_000 => (1_000, "µs"),
            _ => (1_000_000, "ms"),
        };
        return format!("{}{unit}", format_fraction(nanos, scale));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = u128::from(total_secs % 60) * 1_000_000_000 + u128::from(d.subsec_nanos());

    let mut out = if hours > 0 {
        format!("{hours}h{minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        String::new()
    };
    out.push_str(&format_fraction(seconds, 1_000_000_000));
    out.push('s');
    out
}

fn format_fraction(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use podrun_core::{LiteralType, SimpleType, Variable};

    fn vars() -> VariableMap {
        VariableMap::default()
            .with_variable("x", Variable::new(LiteralType::of_simple(SimpleType::String)))
    }

    #[test]
    fn test_download_flag_order() {
        let args = download_command_args(
            &DataReference::from("s3://bucket/inputs.pb"),
            &DataReference::from("s3://bucket/out/"),
            "/var/podrun/inputs",
            MetadataFormat::Yaml,
            Some(&vars()),
        )
        .unwrap();

        assert_eq!(args.len(), 11);
        assert_eq!(args[0], "download");
        let flags: Vec<&str> = args[1..].iter().step_by(2).map(String::as_str).collect();
        assert_eq!(
            flags,
            vec![
                "--from-remote",
                "--to-output-prefix",
                "--to-local-dir",
                "--format",
                "--input-interface"
            ]
        );
        assert_eq!(args[2], "s3://bucket/inputs.pb");
        assert_eq!(args[4], "s3://bucket/out/");
        assert_eq!(args[6], "/var/podrun/inputs");
        assert_eq!(args[8], "yaml");
        assert!(!args[10].is_empty());
    }

    #[test]
    fn test_format_is_lowercase() {
        for format in [MetadataFormat::Json, MetadataFormat::Yaml, MetadataFormat::Proto] {
            let args = download_command_args(
                &DataReference::default(),
                &DataReference::default(),
                "/in",
                format,
                Some(&vars()),
            )
            .unwrap();
            assert_eq!(args[8], args[8].to_lowercase());
            assert_eq!(args[8].to_uppercase(), format.as_str_name());
        }
    }

    #[test]
    fn test_upload_flag_order() {
        let args = sidecar_command_args(
            "/var/podrun/outputs",
            &DataReference::from("s3://bucket/out/"),
            &DataReference::from("s3://bucket/raw/"),
            Duration::from_secs(100),
            Some(&vars()),
        )
        .unwrap();

        assert_eq!(args[0], "upload");
        let flags: Vec<&str> = args[1..].iter().step_by(2).map(String::as_str).collect();
        assert_eq!(
            flags,
            vec![
                "--start-timeout",
                "--to-raw-output",
                "--to-output-prefix",
                "--from-local-dir",
                "--output-interface"
            ]
        );
        assert_eq!(args[2], "1m40s");
        assert_eq!(args[4], "s3://bucket/raw/");
        assert_eq!(args[6], "s3://bucket/out/");
        assert_eq!(args[8], "/var/podrun/outputs");
    }

    #[test]
    fn test_missing_schema() {
        let err = download_command_args(
            &DataReference::default(),
            &DataReference::default(),
            "/in",
            MetadataFormat::Json,
            None,
        );
        assert!(err.is_err());

        let err = sidecar_command_args(
            "/out",
            &DataReference::default(),
            &DataReference::default(),
            Duration::from_secs(1),
            None,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(45)), "45s");
        assert_eq!(format_duration(Duration::from_secs(100)), "1m40s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(7322)), "2h2m2s");
    }
}
