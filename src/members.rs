//! # Member Directory
//!
//! Lookup over authenticated members (organizational level + department)
//! consumed by approval-template materialization and the eligibility query.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// An organization member who can appear on an approval line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub department: String,
    /// Organizational level; higher is more senior.
    pub level: u8,
    pub active: bool,
}

/// In-memory member lookup.
#[derive(Debug, Default)]
pub struct MemberDirectory {
    members: DashMap<i64, Member>,
}

impl MemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, member: Member) {
        self.members.insert(member.id, member);
    }

    pub fn find(&self, id: i64) -> Option<Member> {
        self.members.get(&id).map(|m| m.clone())
    }

    /// Active members of a department within an inclusive level range,
    /// ordered by level descending then id for deterministic selection.
    pub fn in_department_with_level(
        &self,
        department: &str,
        min_level: u8,
        max_level: u8,
    ) -> Vec<Member> {
        let mut matches: Vec<Member> = self
            .members
            .iter()
            .filter(|m| {
                m.active
                    && m.department == department
                    && m.level >= min_level
                    && m.level <= max_level
            })
            .map(|m| m.clone())
            .collect();
        matches.sort_by(|a, b| b.level.cmp(&a.level).then(a.id.cmp(&b.id)));
        matches
    }

    /// Active members at or above the given level, across departments.
    pub fn at_or_above_level(&self, min_level: u8) -> Vec<Member> {
        let mut matches: Vec<Member> = self
            .members
            .iter()
            .filter(|m| m.active && m.level >= min_level)
            .map(|m| m.clone())
            .collect();
        matches.sort_by_key(|m| m.id);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, department: &str, level: u8, active: bool) -> Member {
        Member {
            id,
            name: format!("member-{id}"),
            department: department.to_string(),
            level,
            active,
        }
    }

    fn directory() -> MemberDirectory {
        let dir = MemberDirectory::new();
        dir.upsert(member(1, "purchasing", 2, true));
        dir.upsert(member(2, "purchasing", 4, true));
        dir.upsert(member(3, "purchasing", 5, false));
        dir.upsert(member(4, "finance", 4, true));
        dir
    }

    #[test]
    fn test_department_level_filter() {
        let dir = directory();
        let found = dir.in_department_with_level("purchasing", 3, 6);
        // inactive member 3 excluded, member 1 below range
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_at_or_above_level() {
        let dir = directory();
        let found = dir.at_or_above_level(4);
        let ids: Vec<i64> = found.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }
}
