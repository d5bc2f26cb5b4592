// src/scan/libraries.rs
// =============================================================================
// Optional enrichment: which well-known front-end libraries do the collected
// script references point at?
//
// This reads a SignalReport and never changes it. Each reference is matched
// (case-insensitively, by substring) against a fixed table; the FIRST table
// entry that matches claims the reference. More specific entries sit above
// general ones, e.g. "React Native" above "React" and "AngularJS" above
// "Angular", so a react-native bundle is not also counted as React.
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;

use super::SignalReport;

// (library name, substrings that identify it in a lower-cased script URL)
const KNOWN_LIBRARIES: &[(&str, &[&str])] = &[
    ("React Native", &["react-native"]),
    ("Material UI", &["material-ui", "@mui/", "/mui."]),
    ("Next.js", &["/_next/"]),
    ("React", &["react-dom", "react.production", "react.development", "react.min.js", "/react@", "/react/"]),
    ("AngularJS", &["angular.js", "angular.min.js", "angularjs"]),
    ("Angular", &["@angular/", "angular", "zone.js"]),
    ("Nuxt", &["/_nuxt/"]),
    ("Vue", &["vue.js", "vue.min.js", "vue.global", "vue.runtime", "/vue@"]),
    ("Svelte", &["svelte"]),
    ("jQuery", &["jquery"]),
    ("Bootstrap", &["bootstrap"]),
    ("Lodash", &["lodash"]),
    ("Moment.js", &["moment.js", "moment.min.js", "/moment@"]),
    ("D3", &["/d3.js", "/d3.min.js", "/d3@", "/d3.v"]),
    ("Backbone", &["backbone"]),
    ("Ember", &["ember.js", "ember.min.js", "/ember@"]),
];

/// A library seen in the report and how many references pointed at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryUsage {
    pub name: &'static str,
    pub references: usize,
}

/// Classifies every reference in `report`; libraries come back in table
/// order, only those with at least one match.
pub fn classify(report: &SignalReport) -> Vec<LibraryUsage> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for name in report.iter().filter_map(identify) {
        *counts.entry(name).or_default() += 1;
    }

    KNOWN_LIBRARIES
        .iter()
        .filter_map(|&(name, _)| {
            counts
                .get(name)
                .map(|&references| LibraryUsage { name, references })
        })
        .collect()
}

/// Name of the library a single script reference belongs to, if known.
pub fn identify(reference: &str) -> Option<&'static str> {
    let lowered = reference.to_lowercase();
    KNOWN_LIBRARIES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| lowered.contains(p)))
        .map(|&(name, _)| name)
}
