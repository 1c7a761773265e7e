//! The hand-curated dataset catalog.
//!
//! One entry per tracked technology metric. Definitions are immutable for
//! the run; the batch driver processes them in this order.

use crate::domain::{DatasetDef, Decoration, TimeUnit, YDerivation};

/// Annotation marking the era of multi-core processors on the transistor
/// count chart.
const MULTI_CORE_ERA: &[Decoration] = &[Decoration {
    x_span: (2006.0, 2018.0),
    y: 5.0e6,
    label: "Multi-core era",
    label_at: (2012.0, 1.7e6),
}];

/// All datasets tracked by this repository, in processing order.
pub fn catalog() -> Vec<DatasetDef> {
    vec![
        DatasetDef {
            prefix: "disk-drive-price",
            title: "Storage per dollar ratios",
            y_column: "size_mb",
            y_label: "MB per dollar",
            y_derivation: YDerivation::Ratio {
                numerator: "size_mb",
                denominator: "cost_usd",
            },
            x_lim: Some((1999.0, 2019.0)),
            ..Default::default()
        },
        DatasetDef {
            prefix: "fastest-supercomputer",
            title: "Supercomputer speeds",
            y_column: "flops",
            y_label: "FLOPS",
            x_lim: Some((1991.0, 2018.0)),
            ..Default::default()
        },
        DatasetDef {
            prefix: "research-internet-speed",
            title: "Internet speeds",
            y_column: "bps",
            y_label: "Bits/s",
            ..Default::default()
        },
        DatasetDef {
            prefix: "storage-bus-speed",
            title: "Storage bus speeds",
            y_column: "bps",
            y_label: "Bits/s",
            label_column: Some("name"),
            x_lim: Some((1980.0, 2020.0)),
            ..Default::default()
        },
        DatasetDef {
            prefix: "telescope-pixel-counts",
            title: "Pixel rates of large optical surveys",
            x_label: "Start of science",
            y_column: "pixels",
            y_label: "Pixels/s",
            y_derivation: YDerivation::Ratio {
                numerator: "pixels",
                denominator: "cycle_time",
            },
            label_column: Some("name"),
            x_lim: Some((1998.0, 2026.0)),
            ..Default::default()
        },
        DatasetDef {
            prefix: "telescope-pixel-counts-near-infrared",
            title: "Pixel rates of near-infrared surveys",
            x_label: "Start of science",
            y_column: "pixels",
            y_label: "Pixels/s",
            y_derivation: YDerivation::Ratio {
                numerator: "pixels",
                denominator: "cycle_time",
            },
            label_column: Some("name"),
            ..Default::default()
        },
        DatasetDef {
            prefix: "space-photometry-missions",
            title: "Pixel rates of NASA's photometry missions",
            x_label: "Launch",
            y_column: "pixels_per_second",
            y_label: "Telemetered pixels",
            label_column: Some("name"),
            x_lim: Some((2006.0, 2029.0)),
            ..Default::default()
        },
        DatasetDef {
            prefix: "iau-members",
            title: "Number of IAU members",
            y_column: "iau_members",
            y_label: "Members",
            ..Default::default()
        },
        DatasetDef {
            prefix: "transistor-counts",
            title: "CPU transistor counts",
            y_column: "transistors",
            y_label: "Transistors",
            x_lim: Some((1965.0, 2020.0)),
            decorations: MULTI_CORE_ERA,
            ..Default::default()
        },
        DatasetDef {
            prefix: "cranial-capacity",
            title: "The cranial capacity of humans",
            x_label: "Million years BC",
            y_column: "brain_cc",
            y_label: "Cranial capacity [cm\u{b3}]",
            x_lim: Some((-3.5, 0.1)),
            x_divisor: 1.0e6,
            time_unit: TimeUnit::MillionYears,
            annual_precision: 5,
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn prefixes_are_unique_and_nonempty() {
        let defs = catalog();
        let prefixes: HashSet<&str> = defs.iter().map(|d| d.prefix).collect();
        assert_eq!(prefixes.len(), defs.len());
        assert!(defs.iter().all(|d| !d.prefix.is_empty()));
        assert!(defs.iter().all(|d| !d.title.is_empty()));
        assert!(defs.iter().all(|d| !d.y_column.is_empty()));
    }

    #[test]
    fn ratio_datasets_name_both_columns() {
        for def in catalog() {
            if let YDerivation::Ratio {
                numerator,
                denominator,
            } = def.y_derivation
            {
                assert!(!numerator.is_empty(), "{}", def.prefix);
                assert!(!denominator.is_empty(), "{}", def.prefix);
            }
        }
    }

    #[test]
    fn cranial_capacity_uses_million_year_axis() {
        let defs = catalog();
        let cranial = defs
            .iter()
            .find(|d| d.prefix == "cranial-capacity")
            .unwrap();
        assert_eq!(cranial.time_unit, TimeUnit::MillionYears);
        assert_eq!(cranial.x_divisor, 1.0e6);
        assert_eq!(cranial.annual_precision, 5);
    }
}
