//! Vault agent injection metadata.
//!
//! The Vault agent sidecar reads these annotations off the task, fetches the
//! secret, renders the template and writes the result under
//! [`SECRETS_DIR`]. Key names and paths are fixed by the agent.

use std::collections::BTreeMap;

use crate::config::Endpoint;

use super::connection::VaultRef;

/// Annotation prefix recognized by the Vault agent injector.
pub const ANNOTATION_PREFIX: &str = "vault.hashicorp.com";

/// Directory the agent writes rendered secrets to.
pub const SECRETS_DIR: &str = "/vault/secrets";

/// File name the connection URI is rendered to.
///
/// Shared by every engine; only the template's scheme, host and port vary.
pub const URI_FIELD: &str = "schemaherouri";

/// Path of the rendered URI file inside the task.
#[must_use]
pub fn injected_file_path(field: &str) -> String {
    format!("{SECRETS_DIR}/{field}")
}

/// Builds the agent template that composes a connection URI from the
/// `username` and `password` of the issued secret.
#[must_use]
pub fn uri_template(scheme: &str, endpoint: &Endpoint, secret: &str, database: &str) -> String {
    let Endpoint { host, port } = endpoint;
    format!(
        "\n{{{{- with secret \"{secret}\" -}}}}\n\
         {scheme}://{{{{ .Data.username }}}}:{{{{ .Data.password }}}}@{host}:{port}/{database}\
         {{{{- end }}}}"
    )
}

/// Builds the four injection annotations for a Vault-issued URI.
#[must_use]
pub fn injection_annotations(
    vault: &VaultRef,
    field: &str,
    template: String,
) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            format!("{ANNOTATION_PREFIX}/agent-inject"),
            String::from("true"),
        ),
        (
            format!("{ANNOTATION_PREFIX}/agent-inject-secret-{field}"),
            vault.secret.clone(),
        ),
        (format!("{ANNOTATION_PREFIX}/role"), vault.role.clone()),
        (
            format!("{ANNOTATION_PREFIX}/agent-inject-template-{field}"),
            template,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_injected_file_path() {
        assert_eq!(injected_file_path(URI_FIELD), "/vault/secrets/schemaherouri");
    }

    #[test]
    fn test_uri_template() {
        let endpoint = Endpoint {
            host: String::from("postgres"),
            port: 5432,
        };
        let template = uri_template("postgres", &endpoint, "database/creds/schemahero", "my-database");
        assert_eq!(
            template,
            "\n{{- with secret \"database/creds/schemahero\" -}}\npostgres://{{ .Data.username }}:{{ .Data.password }}@postgres:5432/my-database{{- end }}"
        );
    }

    #[test]
    fn test_injection_annotations() {
        let vault = VaultRef {
            secret: String::from("database/creds/schemahero"),
            role: String::from("schemahero-plan"),
        };
        let annotations = injection_annotations(&vault, URI_FIELD, String::from("tmpl"));

        let keys: Vec<&str> = annotations.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "vault.hashicorp.com/agent-inject",
                "vault.hashicorp.com/agent-inject-secret-schemaherouri",
                "vault.hashicorp.com/agent-inject-template-schemaherouri",
                "vault.hashicorp.com/role",
            ]
        );
        assert_eq!(annotations["vault.hashicorp.com/role"], "schemahero-plan");
        assert_eq!(
            annotations["vault.hashicorp.com/agent-inject-template-schemaherouri"],
            "tmpl"
        );
    }
}
