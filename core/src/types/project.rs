use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub project_key: String,
    pub name: String,
    pub chart_enabled: bool,
    pub subtasking_enabled: bool,
    pub project_leader_can_edit_project_leader: bool,
    pub text_formatting_rule: String,
    pub archived: bool,
    pub display_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_json() {
        let project = Project {
            id: 1,
            project_key: "TEST".to_string(),
            name: "Test Project".to_string(),
            chart_enabled: false,
            subtasking_enabled: true,
            project_leader_can_edit_project_leader: false,
            text_formatting_rule: "markdown".to_string(),
            archived: false,
            display_order: 2147483646,
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["projectKey"], "TEST");
        assert_eq!(json["projectLeaderCanEditProjectLeader"], false);
        let back: Project = serde_json::from_value(json).unwrap();
        assert_eq!(back, project);
    }
}
