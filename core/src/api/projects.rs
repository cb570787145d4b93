use crate::client::BacklogClient;
use crate::error::Result;
use crate::types::{IdOrKey, Project};

impl BacklogClient {
    pub fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_json("/projects", &())
    }

    pub fn get_project(&self, project: impl Into<IdOrKey>) -> Result<Project> {
        self.get_json(&format!("/projects/{}", project.into()), &())
    }
}
