use crate::entities::Item;
use crate::error::Result;
use crate::utils::{attr, bool_attr, child};
use roxmltree::Node;

/// A database connection of a datasource or workbook
#[derive(Debug, Clone, Default)]
pub struct ConnectionItem {
    id: Option<String>,
    connection_type: Option<String>,
    datasource_id: Option<String>,
    datasource_name: Option<String>,
    pub server_address: Option<String>,
    pub server_port: Option<String>,
    pub username: Option<String>,
    /// Only ever sent, never read back from the server
    pub password: Option<String>,
    pub embed_password: Option<bool>,
}

impl ConnectionItem {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn connection_type(&self) -> Option<&str> {
        self.connection_type.as_deref()
    }

    #[must_use]
    pub fn datasource_id(&self) -> Option<&str> {
        self.datasource_id.as_deref()
    }

    #[must_use]
    pub fn datasource_name(&self) -> Option<&str> {
        self.datasource_name.as_deref()
    }
}

impl Item for ConnectionItem {
    const TAG: &'static str = "connection";

    fn from_element(node: Node<'_, '_>, ns: &str) -> Result<Self> {
        let mut connection = Self::default();
        connection.apply_element(node, ns)?;
        Ok(connection)
    }

    fn apply_element(&mut self, node: Node<'_, '_>, ns: &str) -> Result<()> {
        if let Some(id) = attr(node, "id") {
            self.id = Some(id);
        }
        if let Some(connection_type) = attr(node, "type") {
            self.connection_type = Some(connection_type);
        }
        if let Some(address) = attr(node, "serverAddress") {
            self.server_address = Some(address);
        }
        if let Some(port) = attr(node, "serverPort") {
            self.server_port = Some(port);
        }
        if let Some(username) = attr(node, "userName") {
            self.username = Some(username);
        }
        if let Some(embed) = bool_attr(node, "embedPassword") {
            self.embed_password = Some(embed);
        }
        if let Some(datasource) = child(node, ns, "datasource") {
            if let Some(id) = attr(datasource, "id") {
                self.datasource_id = Some(id);
            }
            if let Some(name) = attr(datasource, "name") {
                self.datasource_name = Some(name);
            }
        }
        Ok(())
    }
}
