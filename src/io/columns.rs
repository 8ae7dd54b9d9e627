use std::collections::HashMap;

/// Canonical semantic roles a source column can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Description,
    AssignTo,
    StartDate,
    EndDate,
    ArtifactId,
    Status,
    Progress,
}

/// Order in which roles are tried against each column. A column stops at
/// its first matching role, so Description outranks the date roles for
/// headers like "Task Start Review".
const ROLE_ORDER: [ColumnRole; 7] = [
    ColumnRole::Description,
    ColumnRole::AssignTo,
    ColumnRole::StartDate,
    ColumnRole::EndDate,
    ColumnRole::ArtifactId,
    ColumnRole::Status,
    ColumnRole::Progress,
];

/// Substring-match a lowercased header against one role's keyword set.
/// Keywords cover both CJK project-tracker exports and English sheets.
fn role_matches(role: ColumnRole, header: &str) -> bool {
    let contains_any = |keys: &[&str]| keys.iter().any(|k| header.contains(k));
    match role {
        ColumnRole::Description => {
            contains_any(&["任务", "标题", "title", "task", "name", "description"])
        }
        ColumnRole::AssignTo => contains_any(&["负责", "分配", "owner", "assign", "person"]),
        ColumnRole::StartDate => {
            contains_any(&["开始", "start"]) && !header.contains("actual")
        }
        ColumnRole::EndDate => {
            contains_any(&["结束", "end", "due"]) && !header.contains("actual")
        }
        ColumnRole::ArtifactId => contains_any(&["工件", "id", "artifact", "artfid"]),
        ColumnRole::Status => contains_any(&["状态", "status", "state"]),
        ColumnRole::Progress => contains_any(&["进度", "progress", "complete"]),
    }
}

/// Exact header names tried when the heuristic pass leaves the required
/// roles unresolved.
const FIXED_SCHEMA: [(ColumnRole, &str); 5] = [
    (ColumnRole::Description, "Task Name"),
    (ColumnRole::StartDate, "Expected Start Date"),
    (ColumnRole::EndDate, "Expected End Date"),
    (ColumnRole::AssignTo, "Owner"),
    (ColumnRole::Status, "Status"),
];

/// Resolved mapping from role to source column index.
///
/// Assignment is first-match-wins on both axes: columns are scanned in
/// source order, a role already claimed by an earlier column is never
/// reassigned.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    assignments: HashMap<ColumnRole, usize>,
}

impl ColumnMap {
    /// Map arbitrary column names to canonical roles.
    ///
    /// Falls back to the fixed legacy schema for roles the heuristic could
    /// not place, and finally treats the first column as the description so
    /// that any non-empty sheet yields at least a label per row.
    pub fn identify(headers: &[String]) -> Self {
        let mut map = Self::default();

        let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        for (idx, header) in lowered.iter().enumerate() {
            for role in ROLE_ORDER {
                if !role_matches(role, header) {
                    continue;
                }
                map.assignments.entry(role).or_insert(idx);
                break;
            }
        }

        if !map.has_required() {
            for (role, name) in FIXED_SCHEMA {
                if map.assignments.contains_key(&role) {
                    continue;
                }
                if let Some(idx) = headers.iter().position(|h| h.trim() == name) {
                    map.assignments.insert(role, idx);
                }
            }
        }

        if !map.assignments.contains_key(&ColumnRole::Description) && !headers.is_empty() {
            map.assignments.insert(ColumnRole::Description, 0);
        }

        map
    }

    pub fn index(&self, role: ColumnRole) -> Option<usize> {
        self.assignments.get(&role).copied()
    }

    /// Whether description and both dates resolved to real columns.
    pub fn has_required(&self) -> bool {
        [ColumnRole::Description, ColumnRole::StartDate, ColumnRole::EndDate]
            .iter()
            .all(|r| self.assignments.contains_key(r))
    }

    /// Fetch the trimmed cell a role resolves to in one row; `None` when
    /// the role is unmapped, the row is short, or the cell is blank.
    pub fn cell<'a>(&self, role: ColumnRole, row: &'a [String]) -> Option<&'a str> {
        let idx = self.index(role)?;
        let value = row.get(idx)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
