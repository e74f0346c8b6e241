use itertools::Itertools;

/// Indices of every sample carrying the given group label
pub fn group_members(label: &str, labels: &[String]) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|(_, target)| target.as_str() == label)
        .map(|(i, _)| i)
        .collect()
}

/// Distinct group labels in lexicographic order
pub fn sorted_groups(labels: &[String]) -> Vec<String> {
    labels.iter().sorted().dedup().cloned().collect()
}

/// Returns the first value that occurs more than once
pub fn first_duplicate(names: &[String]) -> Option<&String> {
    names.iter().duplicates().next()
}
