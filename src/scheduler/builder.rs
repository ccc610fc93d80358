//! Component builder.
//!
//! Flattens validated course records into [`Component`]s and collapses
//! schedule-identical offerings into alias groups.
//!
//! # Algorithm
//! For each component group, in course then source order, compute each
//! offering's order-sensitive time signature. The first offering with a
//! signature becomes the representative; later offerings with the same
//! signature are recorded as its aliases and never enter the search.

use std::collections::HashMap;

use crate::models::{AliasMap, Component, CourseRecord, Days};

/// Builds search components and the alias map from course records.
///
/// Components keep course order and, within a course, the source order of
/// component groups. Within a component, representatives keep the order in
/// which their signatures were first seen.
pub fn build_components(courses: &[CourseRecord]) -> (Vec<Component>, AliasMap) {
    let mut components = Vec::new();
    let mut aliases = AliasMap::new();

    for course in courses {
        for group in &course.components {
            let mut component = Component::new(&course.id, &group.kind);
            let mut first_seen: HashMap<Vec<(Days, i32, i32)>, usize> = HashMap::new();

            for offering in &group.offerings {
                let signature = offering.time_signature();
                match first_seen.get(&signature) {
                    Some(&rep) => aliases.add(&component.offerings[rep].id, offering),
                    None => {
                        first_seen.insert(signature, component.offerings.len());
                        component.offerings.push(offering.clone());
                    }
                }
            }

            components.push(component);
        }
    }

    (components, aliases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentOfferings, Offering, TimeSlot};

    fn slot(days: &str, start: i32, end: i32) -> TimeSlot {
        TimeSlot::new(days.parse::<Days>().unwrap(), start, end)
    }

    fn lab(id: &str, section: &str, start: i32) -> Offering {
        Offering::new(id, "LAB", section).with_slot(slot("R", start, start + 170))
    }

    #[test]
    fn test_alias_collapsing() {
        let course = CourseRecord::new("CMPUT 174").with_component(
            ComponentOfferings::new("LAB")
                .with_offering(lab("1", "D1", 1020))
                .with_offering(lab("2", "D2", 840))
                .with_offering(lab("3", "D3", 1020))
                .with_offering(lab("4", "D4", 1020)),
        );
        let (components, aliases) = build_components(&[course]);

        assert_eq!(components.len(), 1);
        let ids: Vec<_> = components[0].offerings.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let siblings = aliases.aliases_of("1");
        assert_eq!(siblings.len(), 2);
        assert_eq!(siblings[0].id, "3");
        assert_eq!(siblings[1].section, "D4");
        assert!(aliases.aliases_of("2").is_empty());
    }

    #[test]
    fn test_location_does_not_prevent_aliasing() {
        let course = CourseRecord::new("MATH 117").with_component(
            ComponentOfferings::new("LEC")
                .with_offering(
                    Offering::new("1", "LEC", "A1")
                        .with_slot(slot("MWF", 600, 650).with_location("CAB 235")),
                )
                .with_offering(
                    Offering::new("2", "LEC", "A2")
                        .with_slot(slot("MWF", 600, 650).with_location("CCIS 1-140")),
                ),
        );
        let (components, aliases) = build_components(&[course]);
        assert_eq!(components[0].len(), 1);
        assert_eq!(aliases.alias_count(), 1);
    }

    #[test]
    fn test_aliasing_is_per_component() {
        // Same times in different components never alias each other.
        let course = CourseRecord::new("CHEM 101")
            .with_component(ComponentOfferings::new("LEC").with_offering(
                Offering::new("1", "LEC", "A1").with_slot(slot("T", 600, 650)),
            ))
            .with_component(ComponentOfferings::new("SEM").with_offering(
                Offering::new("2", "SEM", "S1").with_slot(slot("T", 600, 650)),
            ));
        let (components, aliases) = build_components(&[course]);
        assert_eq!(components.len(), 2);
        assert_eq!(components[1].label(), "CHEM 101 SEM");
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_component_order_is_stable() {
        let courses = vec![
            CourseRecord::new("B 200")
                .with_component(ComponentOfferings::new("LEC").with_offering(lab("1", "A1", 600)))
                .with_component(ComponentOfferings::new("LAB").with_offering(lab("2", "D1", 900))),
            CourseRecord::new("A 100")
                .with_component(ComponentOfferings::new("SEM").with_offering(lab("3", "S1", 600))),
        ];
        let (components, _) = build_components(&courses);
        let labels: Vec<_> = components.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["B 200 LEC", "B 200 LAB", "A 100 SEM"]);
    }
}
