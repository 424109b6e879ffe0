//! The fixed extraction query.
//!
//! Edit the statement below (and the matching declarations in
//! [`crate::declarations`]) to point the extractor at a different result
//! set. Column aliases in the SELECT list are the names the declarations
//! refer to.

/// SQL executed against the MariaDB source on every run.
pub const QUERY: &str = r#"
SELECT
    o.customer_name   AS CUSTOMER_NAME,
    o.status          AS ORDER_STATUS,
    o.total           AS ORDER_TOTAL,
    o.unit_price      AS UNIT_PRICE,
    o.quantity        AS QUANTITY,
    o.created_at      AS CREATED_AT,
    o.delivery_date   AS DELIVERY_DATE,
    o.is_paid         AS IS_PAID
FROM orders o
WHERE
    o.customer_name IS NOT NULL
ORDER BY
    o.created_at ASC
"#;
