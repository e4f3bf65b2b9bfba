//! Reduces each permutation's variant records to a minimal signature.

use std::collections::HashSet;

use indexmap::IndexSet;
use permlink_common::{BindingProperty, Permutation, SelectionDescriptor, VALUE_SEPARATOR};

use crate::error::LinkError;
use crate::registry::PermutationRegistry;

/// Computes the reduced signature of every registered permutation.
///
/// The result follows registry order and is the input of the permutation map.
pub fn collect_permutation_selectors(
    registry: &PermutationRegistry,
) -> Result<Vec<SelectionDescriptor>, LinkError> {
    let descriptors = registry
        .iter()
        .map(reduce_permutation)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(descriptors = descriptors.len(), "permutation map created");
    Ok(descriptors)
}

/// Reduces one permutation's variant records to its distinguishing bindings.
///
/// Every variant record must name the permutation that holds it.
/// Property names are visited in the order of the first variant record. A
/// property is kept when the permutation has a single variant, or when its
/// values differ across variants; kept values are the distinct values joined
/// with `,` in first-seen order. The result is stably sorted so properties
/// with more alternatives come first.
pub fn reduce_permutation(permutation: &Permutation) -> Result<SelectionDescriptor, LinkError> {
    let selectors = &permutation.selectors;
    let first = selectors.first().ok_or_else(|| LinkError::NoSelectionData {
        permutation: permutation.name.clone(),
    })?;
    if let Some(stray) = selectors
        .iter()
        .find(|s| s.permutation_name != permutation.name)
    {
        return Err(LinkError::IdentityConflict {
            expected: permutation.name.clone(),
            found: stray.permutation_name.clone(),
        });
    }

    let mut completed: HashSet<&str> = HashSet::new();
    let mut calculated = Vec::new();
    for property in &first.binding_properties {
        let key = property.name.as_str();
        if !completed.insert(key) {
            continue;
        }
        let values = collect_values_for_key(selectors, key);
        if selectors.len() == 1 || values.len() > 1 {
            calculated.push(BindingProperty::new(key, join_values(&values)));
        }
    }
    calculated.sort_by(|a, b| b.component_count().cmp(&a.component_count()));

    Ok(SelectionDescriptor::new(permutation.name.clone(), calculated))
}

fn collect_values_for_key<'a>(
    selectors: &'a [SelectionDescriptor],
    key: &str,
) -> IndexSet<&'a str> {
    selectors
        .iter()
        .flat_map(|s| s.binding_properties.iter())
        .filter(|p| p.name == key)
        .map(|p| p.value.as_str())
        .collect()
}

fn join_values(values: &IndexSet<&str>) -> String {
    let mut joined = String::new();
    for value in values {
        if !joined.is_empty() {
            joined.push(VALUE_SEPARATOR);
        }
        joined.push_str(value);
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(name: &str, props: &[(&str, &str)]) -> SelectionDescriptor {
        SelectionDescriptor::new(
            name,
            props
                .iter()
                .map(|(k, v)| BindingProperty::new(*k, *v))
                .collect(),
        )
    }

    fn permutation(name: &str, variants: &[&[(&str, &str)]]) -> Permutation {
        let mut p = Permutation::new(name);
        for props in variants {
            p.add_selector(variant(name, props));
        }
        p
    }

    #[test]
    fn single_variant_passthrough() {
        let p = permutation("P", &[&[("browser", "safari"), ("locale", "en")]]);
        let reduced = reduce_permutation(&p).unwrap();
        assert_eq!(reduced.permutation_name, "P");
        assert_eq!(
            reduced.binding_properties,
            vec![
                BindingProperty::new("browser", "safari"),
                BindingProperty::new("locale", "en"),
            ]
        );
    }

    #[test]
    fn constant_property_elision() {
        let p = permutation(
            "P",
            &[
                &[("browser", "chrome"), ("locale", "en")],
                &[("browser", "chrome"), ("locale", "fr")],
            ],
        );
        let reduced = reduce_permutation(&p).unwrap();
        assert_eq!(
            reduced.binding_properties,
            vec![BindingProperty::new("locale", "en,fr")]
        );
    }

    #[test]
    fn descending_cardinality_ordering() {
        let p = permutation(
            "P",
            &[
                &[("mode", "a"), ("size", "s")],
                &[("mode", "b"), ("size", "m")],
                &[("mode", "a"), ("size", "l")],
            ],
        );
        let reduced = reduce_permutation(&p).unwrap();
        assert_eq!(
            reduced.binding_properties,
            vec![
                BindingProperty::new("size", "s,m,l"),
                BindingProperty::new("mode", "a,b"),
            ]
        );
    }

    #[test]
    fn equal_cardinality_keeps_first_variant_order() {
        let p = permutation(
            "P",
            &[
                &[("x", "1"), ("y", "1"), ("z", "1")],
                &[("x", "2"), ("y", "2"), ("z", "1")],
            ],
        );
        let reduced = reduce_permutation(&p).unwrap();
        let names: Vec<_> = reduced
            .binding_properties
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn joined_values_in_first_seen_order() {
        let p = permutation(
            "P",
            &[&[("locale", "fr")], &[("locale", "en")], &[("locale", "fr_CA")]],
        );
        let reduced = reduce_permutation(&p).unwrap();
        assert_eq!(reduced.binding_properties[0].value, "fr,en,fr_CA");
    }

    #[test]
    fn only_first_variant_keys_are_considered() {
        let p = permutation(
            "P",
            &[&[("locale", "en")], &[("locale", "fr"), ("browser", "gecko")]],
        );
        let reduced = reduce_permutation(&p).unwrap();
        assert_eq!(
            reduced.binding_properties,
            vec![BindingProperty::new("locale", "en,fr")]
        );
    }

    #[test]
    fn all_constant_properties_reduce_to_nothing() {
        let mut p = permutation("P", &[&[("locale", "en")]]);
        // a second record that differs only in a property missing from the first
        p.add_selector(variant("P", &[("locale", "en"), ("browser", "ie")]));
        let reduced = reduce_permutation(&p).unwrap();
        assert!(reduced.binding_properties.is_empty());
    }

    #[test]
    fn zero_variants_is_an_error() {
        let p = Permutation::new("EMPTY");
        match reduce_permutation(&p).unwrap_err() {
            LinkError::NoSelectionData { permutation } => assert_eq!(permutation, "EMPTY"),
            other => panic!("expected NoSelectionData, got {other:?}"),
        }
    }

    #[test]
    fn collects_in_registry_order() {
        let registry = PermutationRegistry::from_permutations(vec![
            permutation("B", &[&[("locale", "fr")]]),
            permutation("A", &[&[("locale", "en")]]),
        ]);
        let descriptors = collect_permutation_selectors(&registry).unwrap();
        let names: Vec<_> = descriptors
            .iter()
            .map(|d| d.permutation_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn collect_fails_on_any_empty_permutation() {
        let registry = PermutationRegistry::from_permutations(vec![
            permutation("A", &[&[("locale", "en")]]),
            Permutation::new("B"),
        ]);
        assert!(matches!(
            collect_permutation_selectors(&registry),
            Err(LinkError::NoSelectionData { .. })
        ));
    }

    #[test]
    fn variant_naming_another_permutation_is_a_conflict() {
        let mut p = permutation("P1", &[&[("locale", "en")]]);
        p.add_selector(variant("P2", &[("locale", "fr")]));
        match reduce_permutation(&p).unwrap_err() {
            LinkError::IdentityConflict { expected, found } => {
                assert_eq!(expected, "P1");
                assert_eq!(found, "P2");
            }
            other => panic!("expected IdentityConflict, got {other:?}"),
        }
    }
}
