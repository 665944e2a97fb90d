/// CreateProjectRequest - Internal request DTO for the project creation use case
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    /// Unique project name, the store key
    pub name: String,
    pub description: String,
    /// Name of the uploaded manifest, used in error messages
    pub file_name: String,
    /// Raw manifest bytes, decoded by the manifest parser
    pub manifest: Vec<u8>,
}

impl CreateProjectRequest {
    pub fn new(name: String, description: String, file_name: String, manifest: Vec<u8>) -> Self {
        Self {
            name,
            description,
            file_name,
            manifest,
        }
    }
}
