use crate::sql::base::error::DbError;
use bytes::BytesMut;
use model::records::row::RowId;
use std::error::Error;
use tokio_postgres::{
    Row,
    types::{IsNull, ToSql, Type, to_sql_checked},
};
use uuid::Uuid;

/// Binds a [`RowId`] with whatever integer width, uuid or text type the
/// server inferred for the id placeholder.
#[derive(Debug)]
pub struct PgRowId<'a>(pub &'a RowId);

impl ToSql for PgRowId<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self.0 {
            RowId::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                Type::INT8 => v.to_sql(ty, out),
                _ => v.to_string().to_sql(ty, out),
            },
            RowId::Uuid(v) => match *ty {
                Type::UUID => v.to_sql(ty, out),
                _ => v.to_string().to_sql(ty, out),
            },
            RowId::Text(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::UUID
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
        )
    }

    to_sql_checked!();
}

/// Decodes the id at `idx` according to the column's declared type.
pub fn row_id_from_row(row: &Row, idx: usize) -> Result<RowId, DbError> {
    let ty = row
        .columns()
        .get(idx)
        .map(|c| c.type_().clone())
        .ok_or_else(|| DbError::Unknown(format!("Missing column {idx} in result row")))?;

    let id = match ty {
        Type::INT2 => RowId::Int(row.try_get::<_, i16>(idx)? as i64),
        Type::INT4 => RowId::Int(row.try_get::<_, i32>(idx)? as i64),
        Type::INT8 => RowId::Int(row.try_get::<_, i64>(idx)?),
        Type::UUID => RowId::Uuid(row.try_get::<_, Uuid>(idx)?),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            RowId::Text(row.try_get::<_, String>(idx)?)
        }
        other => return Err(DbError::UnsupportedIdType(other.name().to_string())),
    };

    Ok(id)
}
