// Customer directory backends
//
// - InMemoryCustomerRepository: process-local, seeded with the fixture record,
//   lost on restart
// - MySqlCustomerRepository: durable store behind DATABASE_URL

use async_trait::async_trait;
use sqlx::MySqlPool;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::modules::customers::models::CustomerRecord;

/// Lookup-by-email and append capability over the customer directory
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// First record stored for `email`, if any
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>>;

    /// Append a record; existing records are never touched
    async fn insert(&self, record: CustomerRecord) -> Result<()>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}

/// Append-only in-memory directory
pub struct InMemoryCustomerRepository {
    records: RwLock<Vec<CustomerRecord>>,
}

impl InMemoryCustomerRepository {
    pub fn new(records: Vec<CustomerRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Directory holding only the fixture customer
    pub fn seeded() -> Self {
        Self::new(vec![CustomerRecord::fixture()])
    }

    pub async fn snapshot(&self) -> Vec<CustomerRecord> {
        self.records.read().await.clone()
    }
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    async fn insert(&self, record: CustomerRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}

/// MySQL-backed directory (table `customers`, see migrations/)
pub struct MySqlCustomerRepository {
    pool: MySqlPool,
}

impl MySqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for MySqlCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerRecord>> {
        let record = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT external_id, email
            FROM customers
            WHERE email = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert(&self, record: CustomerRecord) -> Result<()> {
        sqlx::query("INSERT INTO customers (external_id, email) VALUES (?, ?)")
            .bind(&record.external_id)
            .bind(&record.email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as usize)
    }
}
