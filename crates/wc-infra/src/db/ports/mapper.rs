use anyhow::Result;

/// Domain value -> insertable row.
pub trait InsertMapper<D, R>: Sync + Send {
    fn to_row(&self, domain: &D) -> Result<R>;
}

/// Stored row -> domain value. Fails on rows that violate domain invariants.
pub trait RowMapper<R, D>: Sync + Send {
    fn to_domain(&self, row: &R) -> Result<D>;
}
