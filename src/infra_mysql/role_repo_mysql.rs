use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Roles persist their permissions as one comma-delimited column.
pub fn parse_permissions(raw: Option<&str>) -> PermissionSet {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Role names match byte for byte, whatever the column collation folds.
fn exact_role(candidates: Vec<Role>, name: &str) -> Option<Role> {
    candidates.into_iter().find(|r| r.name == name)
}

pub struct MySqlRoleRepo {
    pool: MySqlPool,
}

impl MySqlRoleRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlRoleRepo { pool }
    }

    fn row_to_role(row: &MySqlRow) -> Result<Role, StoreError> {
        let corrupt = |e: sqlx::Error| StoreError::Corrupt(format!("roles: {e}"));
        let raw: Option<String> = row.try_get("permissions").map_err(corrupt)?;
        Ok(Role {
            role_id: row.try_get("role_id").map_err(corrupt)?,
            name: row.try_get("role_name").map_err(corrupt)?,
            permissions: parse_permissions(raw.as_deref()),
        })
    }
}

#[async_trait::async_trait]
impl RoleRepo for MySqlRoleRepo {
    async fn find_permissions(&self, role: &str) -> Result<Option<PermissionSet>, StoreError> {
        let rows = sqlx::query(
            "SELECT role_id, role_name, permissions FROM roles WHERE role_name = ?",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        let candidates = rows
            .iter()
            .map(Self::row_to_role)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exact_role(candidates, role).map(|r| r.permissions))
    }

    async fn list(&self) -> Result<Vec<Role>, StoreError> {
        let rows =
            sqlx::query("SELECT role_id, role_name, permissions FROM roles ORDER BY role_id")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(Self::row_to_role).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_delimited_permissions() {
        let set = parse_permissions(Some("a,b,c"));
        assert_eq!(set.len(), 3);
        assert!(set.contains("a"));
        assert!(!set.contains("z"));
    }

    #[test]
    fn trims_and_drops_empty_tokens() {
        let set = parse_permissions(Some(" view_all , ,modify,"));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["modify", "view_all"]);
    }

    #[test]
    fn role_lookup_ignores_case_folded_rows() {
        let admin = Role {
            role_id: RoleId(1),
            name: "admin".to_string(),
            permissions: parse_permissions(Some("view_all,modify")),
        };

        assert!(exact_role(vec![admin.clone()], "ADMIN").is_none());
        assert!(exact_role(vec![admin.clone()], "admin ").is_none());
        assert_eq!(exact_role(vec![admin], "admin").unwrap().role_id, RoleId(1));
    }

    #[test]
    fn missing_column_is_empty_set() {
        assert!(parse_permissions(None).is_empty());
        assert!(parse_permissions(Some("")).is_empty());
    }
}
