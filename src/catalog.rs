//! Static endpoint catalogs
//!
//! One table per source system. Each entry says where a collection lives,
//! how it pages, which key holds its items and which file it is saved to.

use crate::pagination::{OffsetPaginator, PageParams, Paginator, SignalKind, SinglePagePaginator};
use crate::types::Source;

/// How an endpoint is paged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// Offset/limit paging; `expect` names the signal the endpoint uses
    Offset {
        /// Signal the endpoint is known to expose, if any
        expect: Option<SignalKind>,
    },
    /// One request returning a single object
    Single,
}

/// Static description of one fetchable resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Source system
    pub source: Source,
    /// Short resource name (`users`, `spaces`, ...)
    pub name: &'static str,
    /// Path below the source's API root, may carry a fixed query string
    pub path: &'static str,
    /// Snapshot file name
    pub output_file: &'static str,
    /// Key holding the page's items
    pub items_key: &'static str,
    /// Offset and limit parameter names
    pub params: PageParams,
    /// Paging behaviour
    pub paging: Paging,
}

impl EndpointDescriptor {
    /// `source/name`, used to identify the endpoint in logs and errors
    pub fn id(&self) -> String {
        format!("{}/{}", self.source, self.name)
    }

    /// Build the paginator for this endpoint
    pub fn paginator(&self, page_size: u32) -> Box<dyn Paginator> {
        match self.paging {
            Paging::Offset { expect } => {
                Box::new(OffsetPaginator::new(self.params, page_size).expecting(expect))
            }
            Paging::Single => Box::new(SinglePagePaginator),
        }
    }
}

const fn jira(
    name: &'static str,
    path: &'static str,
    output_file: &'static str,
) -> EndpointDescriptor {
    EndpointDescriptor {
        source: Source::Jira,
        name,
        path,
        output_file,
        items_key: "values",
        params: PageParams::START_AT,
        paging: Paging::Offset { expect: None },
    }
}

const fn jira_single(
    name: &'static str,
    path: &'static str,
    output_file: &'static str,
) -> EndpointDescriptor {
    EndpointDescriptor {
        paging: Paging::Single,
        ..jira(name, path, output_file)
    }
}

const fn confluence(
    name: &'static str,
    path: &'static str,
    output_file: &'static str,
) -> EndpointDescriptor {
    EndpointDescriptor {
        source: Source::Confluence,
        name,
        path,
        output_file,
        items_key: "results",
        params: PageParams::START_LIMIT,
        paging: Paging::Offset {
            expect: Some(SignalKind::NextLink),
        },
    }
}

/// Jira endpoints, in run order
pub static JIRA_ENDPOINTS: &[EndpointDescriptor] = &[
    jira("users", "user/search?query=", "jira_users.json"),
    jira("groups", "group", "jira_groups.json"),
    jira("projects", "project/search", "jira_projects.json"),
    jira("project_categories", "projectCategory", "jira_project_categories.json"),
    jira_single("configuration", "configuration", "jira_configuration.json"),
    jira("custom_fields", "customFields", "jira_custom_fields.json"),
    jira("cluster_nodes", "cluster/nodes", "jira_cluster_nodes.json"),
    jira("fields", "field", "jira_fields.json"),
    jira("dashboards", "dashboard/search", "jira_dashboards.json"),
    jira("filters", "filter/search", "jira_filters.json"),
    jira_single("system_info", "serverInfo", "jira_system_info.json"),
    jira("issue_security_schemes", "issuesecurityschemes", "jira_issue_security_schemes.json"),
    jira("issue_types", "issuetype", "jira_issue_types.json"),
    jira("issue_type_schemes", "issuetypescheme", "jira_issue_type_schemes.json"),
    jira("notification_schemes", "notificationscheme", "jira_notification_schemes.json"),
    jira("permission_schemes", "permissionscheme", "jira_permission_schemes.json"),
    jira("priorities", "priority", "jira_priorities.json"),
    jira("priority_schemes", "priorityschemes", "jira_priority_schemes.json"),
    jira("screens", "screens", "jira_screens.json"),
    jira("statuses", "status", "jira_statuses.json"),
    jira("status_categories", "statuscategory", "jira_status_categories.json"),
];

/// Confluence endpoints, in run order
pub static CONFLUENCE_ENDPOINTS: &[EndpointDescriptor] = &[
    confluence("spaces", "space", "confluence_spaces.json"),
    confluence("content", "content", "confluence_content.json"),
    confluence("groups", "group", "confluence_groups.json"),
    confluence("users", "user", "confluence_users.json"),
];

/// Default snapshot file for the ad-hoc issue search
pub const ISSUES_OUTPUT_FILE: &str = "jira_issues.json";

/// Jira issue search; driven by `total` + `startAt`, items under `issues`
pub const JIRA_ISSUE_SEARCH: EndpointDescriptor = EndpointDescriptor {
    source: Source::Jira,
    name: "issues",
    path: "search",
    output_file: ISSUES_OUTPUT_FILE,
    items_key: "issues",
    params: PageParams::START_AT,
    paging: Paging::Offset {
        expect: Some(SignalKind::TotalCount),
    },
};

/// The catalog for a source
pub fn catalog(source: Source) -> &'static [EndpointDescriptor] {
    match source {
        Source::Jira => JIRA_ENDPOINTS,
        Source::Confluence => CONFLUENCE_ENDPOINTS,
    }
}

/// Look up one endpoint by name
pub fn find(source: Source, name: &str) -> Option<&'static EndpointDescriptor> {
    catalog(source).iter().find(|e| e.name == name)
}
