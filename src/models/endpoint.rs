use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// HTTP methods the catalog can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The request shapes the playground knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    IndexRepository,
    GetRepositoryInfo,
    QueryRepo,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 3] = [
        EndpointKind::IndexRepository,
        EndpointKind::GetRepositoryInfo,
        EndpointKind::QueryRepo,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            EndpointKind::IndexRepository => "index-repository",
            EndpointKind::GetRepositoryInfo => "get-repository-info",
            EndpointKind::QueryRepo => "query-repo",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Static catalog entry for this endpoint
    pub fn descriptor(&self) -> EndpointDescriptor {
        match self {
            EndpointKind::IndexRepository => EndpointDescriptor {
                id: self.id(),
                kind: *self,
                method: HttpMethod::Post,
                path: "/v2/repositories",
                title: "Index Repository",
                description: "Initiates processing or reprocessing of a specified repository.",
                fields: vec![
                    FieldSpec::header(fields::AUTHORIZATION, "Bearer <token>"),
                    FieldSpec::header(fields::GITHUB_TOKEN, "<api-key>"),
                    FieldSpec::string(fields::REMOTE, "github").with_default("github"),
                    FieldSpec::string(fields::REPOSITORY, "owner/repository").required(),
                    FieldSpec::string(fields::BRANCH, "main").required(),
                    FieldSpec::boolean(fields::RELOAD, true),
                    FieldSpec::boolean(fields::NOTIFY, true),
                ],
            },
            EndpointKind::GetRepositoryInfo => EndpointDescriptor {
                id: self.id(),
                kind: *self,
                method: HttpMethod::Get,
                path: "/v2/repositories/{repositoryId}",
                title: "Get Repository Info",
                description: "Retrieves information about a specific repository.",
                fields: vec![
                    FieldSpec::header(fields::AUTHORIZATION, "Bearer <token>"),
                    FieldSpec::path(fields::REPOSITORY_ID, "123"),
                ],
            },
            EndpointKind::QueryRepo => EndpointDescriptor {
                id: self.id(),
                kind: *self,
                method: HttpMethod::Post,
                path: "/v2/query",
                title: "Query Repo(s)",
                description: "Query repositories with natural language.",
                fields: vec![
                    FieldSpec::header(fields::AUTHORIZATION, "Bearer <token>"),
                    FieldSpec::header(fields::GITHUB_TOKEN, "<api-key>"),
                    FieldSpec::text(fields::CONTENT, "How does authentication work?").required(),
                    FieldSpec::string(fields::MESSAGE_ID, "msg1"),
                    FieldSpec::string(fields::ROLE, "user").with_default("user"),
                    FieldSpec::string(fields::REPOSITORY, "owner/repository").required(),
                    FieldSpec::string(fields::REMOTE, "github").with_default("github"),
                    FieldSpec::string(fields::BRANCH, "main").required(),
                    FieldSpec::string(fields::SESSION_ID, "session123"),
                    FieldSpec::boolean(fields::STREAM, true),
                    FieldSpec::boolean(fields::GENIUS, true),
                ],
            },
        }
    }
}

/// Field names accepted by the catalog endpoints
pub mod fields {
    pub const AUTHORIZATION: &str = "authorization";
    pub const GITHUB_TOKEN: &str = "githubToken";
    pub const REMOTE: &str = "remote";
    pub const REPOSITORY: &str = "repository";
    pub const REPOSITORY_ID: &str = "repositoryId";
    pub const BRANCH: &str = "branch";
    pub const RELOAD: &str = "reload";
    pub const NOTIFY: &str = "notify";
    pub const CONTENT: &str = "content";
    pub const MESSAGE_ID: &str = "messageId";
    pub const ROLE: &str = "role";
    pub const SESSION_ID: &str = "sessionId";
    pub const STREAM: &str = "stream";
    pub const GENIUS: &str = "genius";
}

/// Where a field value ends up in the built request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldLocation {
    Header,
    Path,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    /// Entered as the text "true" or "false"
    Boolean,
    /// Multi-line free text
    Text,
}

/// One form field of an endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldSpec {
    pub name: &'static str,
    pub location: FieldLocation,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<&'static str>,
    pub placeholder: &'static str,
}

impl FieldSpec {
    fn new(name: &'static str, location: FieldLocation, kind: FieldKind, placeholder: &'static str) -> Self {
        Self {
            name,
            location,
            kind,
            required: false,
            default: None,
            placeholder,
        }
    }

    fn header(name: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, FieldLocation::Header, FieldKind::String, placeholder)
    }

    fn path(name: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, FieldLocation::Path, FieldKind::String, placeholder).required()
    }

    fn string(name: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, FieldLocation::Body, FieldKind::String, placeholder)
    }

    fn text(name: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, FieldLocation::Body, FieldKind::Text, placeholder)
    }

    fn boolean(name: &'static str, default: bool) -> Self {
        let default = if default { "true" } else { "false" };
        Self::new(name, FieldLocation::Body, FieldKind::Boolean, default).with_default(default)
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}

/// Static catalog entry describing one callable API operation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointDescriptor {
    pub id: &'static str,
    #[serde(skip)]
    pub kind: EndpointKind,
    pub method: HttpMethod,
    /// Path template, may contain `{placeholder}` segments
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl EndpointDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// All endpoints, in catalog order
pub fn catalog() -> Vec<EndpointDescriptor> {
    EndpointKind::ALL.iter().map(|k| k.descriptor()).collect()
}

/// Look up an endpoint by its identifier
pub fn find_endpoint(id: &str) -> Option<EndpointDescriptor> {
    EndpointKind::from_id(id).map(|kind| kind.descriptor())
}
