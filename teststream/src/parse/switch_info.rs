//! Parser for `show information switch <name>`.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::ParseError;
use crate::model::{BladeDetails, BladeRecord, ChassisRecord, SwitchInfo};

static SECTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)PHYSICAL\s+INFORMATION(?P<physical>.*?)SWITCH\s+COMPONENTS(?P<components>.*)")
        .expect("switch info sections pattern")
});

static MODEL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)Switch Model:[ \t]*(.*?)[ \t\r]*$").expect("switch model pattern")
});

static IP_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)IP Address:[ \t]*(.*?)[ \t\r]*$").expect("ip address pattern")
});

static CHASSIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)chassis\s+controller\s+(\d+):").expect("chassis controller pattern")
});

// The label may contain single spaces ("S-Blade 64"); two or more spaces end it.
static BLADE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pim:[ \t]+(\d+)[ \t]+(\S+(?: \S+)*)").expect("blade line pattern")
});

static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("column gap pattern"));

/// Parse switch identity and the chassis/blade inventory.
pub fn parse_switch_info(text: &str) -> Result<SwitchInfo, ParseError> {
    let sections = SECTIONS
        .captures(text)
        .ok_or_else(|| ParseError::MissingSection {
            section: "PHYSICAL INFORMATION / SWITCH COMPONENTS".to_string(),
        })?;

    let physical = &sections["physical"];
    let model_name = capture_field(&MODEL_NAME, physical, "Switch Model")?;
    let ip_address = capture_field(&IP_ADDRESS, physical, "IP Address")?;
    let chassis = parse_components(&sections["components"])?;

    debug!(
        "switch model '{}' at {} with {} chassis",
        model_name,
        ip_address,
        chassis.len()
    );

    Ok(SwitchInfo {
        model_name,
        ip_address,
        chassis,
    })
}

fn capture_field(pattern: &Regex, text: &str, field: &str) -> Result<String, ParseError> {
    pattern
        .captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
}

fn parse_components(text: &str) -> Result<Vec<ChassisRecord>, ParseError> {
    let headers: Vec<_> = CHASSIS.captures_iter(text).collect();
    let mut chassis = Vec::with_capacity(headers.len());

    for (i, caps) in headers.iter().enumerate() {
        let header = caps.get(0).map_or(0..0, |m| m.range());
        let end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());

        chassis.push(ChassisRecord {
            id: parse_id("chassis controller", &caps[1])?,
            blades: parse_blades(&text[header.end..end])?,
        });
    }

    Ok(chassis)
}

fn parse_blades(block: &str) -> Result<Vec<BladeRecord>, ParseError> {
    let lines: Vec<_> = BLADE.captures_iter(block).collect();
    let mut blades = Vec::with_capacity(lines.len());

    for (i, caps) in lines.iter().enumerate() {
        let label = caps.get(2).map_or("", |m| m.as_str());
        let rest_start = caps.get(0).map_or(0, |m| m.end());
        let rest_end = lines
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(block.len(), |m| m.start());

        blades.push(BladeRecord {
            id: parse_id("pim", &caps[1])?,
            label: label.to_string(),
            details: parse_blade_details(&block[rest_start..rest_end]),
        });
    }

    Ok(blades)
}

/// Parse the hardware line following a blade label.
///
/// Two layouts are printed depending on firmware:
/// `vendor,model,uboot_rev,serial` or `model  uboot_rev  serial`.
pub fn parse_blade_details(text: &str) -> Option<BladeDetails> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;

    let fields: Vec<&str> = line.rsplitn(4, ',').collect();
    if let [serial, uboot, model, vendor] = fields.as_slice() {
        return Some(BladeDetails {
            vendor: Some(vendor.trim().to_string()),
            model: model.trim().to_string(),
            uboot_rev: uboot.trim().to_string(),
            serial_number: serial.trim().to_string(),
        });
    }

    let fields: Vec<&str> = WIDE_GAP.split(line).collect();
    match fields.as_slice() {
        [model, uboot, serial, ..] => Some(BladeDetails {
            vendor: None,
            model: model.to_string(),
            uboot_rev: uboot.to_string(),
            serial_number: serial.to_string(),
        }),
        _ => {
            debug!("unrecognized blade details '{}'", line);
            None
        }
    }
}

fn parse_id(field: &str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}
