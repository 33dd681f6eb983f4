use serde::Serialize;

use crate::types::{Finding, Issue, IssueKind, KindSelector};

/// The merged issue list of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IssueList {
    issues: Vec<Issue>,
}

impl IssueList {
    /// Merge detector findings, giving each a stable id of the form
    /// `kind-paragraph-offset-seq`.
    pub fn aggregate(findings: Vec<Finding>) -> Self {
        let issues = findings
            .into_iter()
            .enumerate()
            .map(|(seq, finding)| {
                let id = format!(
                    "{}-{}-{}-{}",
                    finding.kind,
                    finding.position.paragraph_index,
                    finding.position.start_offset,
                    seq
                );
                finding.into_issue(id)
            })
            .collect();
        Self { issues }
    }

    pub fn count_by_kind(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    pub fn filter_by_kind(&self, kind: IssueKind) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.kind == kind).collect()
    }

    /// The issues a bulk fix targets.
    pub fn select(&self, selector: KindSelector) -> Vec<&Issue> {
        match selector {
            KindSelector::All => self.issues.iter().collect(),
            KindSelector::Kind(kind) => self.filter_by_kind(kind),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    /// Drop the issues with the given ids; the rest keep their order and content.
    pub fn remove_ids(&mut self, ids: &[String]) {
        self.issues.retain(|i| !ids.contains(&i.id));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }
}

impl<'a> IntoIterator for &'a IssueList {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
