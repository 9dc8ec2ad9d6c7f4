use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use salonbook_auth::{Principal, require_admin};
use salonbook_core::{Clock, IdGenerator, Repository, StockItemId};

use crate::alerts::AlertSummary;
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::item::{NewStockItem, StockItem, StockItemPatch, StockRecord};
use crate::movement::Movement;
use crate::statistics::StockStatistics;

/// Storage for stock items.
pub trait StockRepository: Repository<StockItem> {}

impl<T> StockRepository for T where T: Repository<StockItem> + ?Sized {}

/// Owns the stock items and applies movements to them.
///
/// Every mutating operation is admin-only and runs its read-validate-write
/// sequence under `write_lock`.
pub struct Ledger<R> {
    config: LedgerConfig,
    repo: R,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    write_lock: Mutex<()>,
}

impl<R> Ledger<R>
where
    R: StockRepository,
{
    pub fn new(config: LedgerConfig, repo: R, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            config,
            repo,
            clock,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    fn record(&self, item: StockItem) -> StockRecord {
        item.into_record(self.today(), &self.config)
    }

    fn records(&self) -> LedgerResult<Vec<StockRecord>> {
        let today = self.today();
        let mut items = self.repo.list()?;
        items.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(items
            .into_iter()
            .map(|item| item.into_record(today, &self.config))
            .collect())
    }

    /// All items ordered by name.
    pub fn list_items(&self) -> LedgerResult<Vec<StockRecord>> {
        let records = self.records()?;
        debug!(count = records.len(), "listed stock items");
        Ok(records)
    }

    pub fn get_item(&self, id: StockItemId) -> LedgerResult<StockRecord> {
        let item = self.repo.get(&id)?.ok_or(LedgerError::NotFound)?;
        Ok(self.record(item))
    }

    pub fn create_item(&self, principal: &Principal, request: NewStockItem) -> LedgerResult<StockRecord> {
        require_admin(principal, "stock.create")?;

        let _guard = self.lock_writes();
        let id = StockItemId::from_uuid(self.ids.next_id());
        let item = request
            .build(id, &self.config)
            .inspect_err(|e| warn!(code = e.code(), error = %e, "stock item rejected"))?;

        self.repo.insert(item.clone())?;
        let record = self.record(item);
        info!(
            stock_item_id = %id,
            product_ref = %record.item.product_ref,
            quantity_on_hand = record.item.quantity_on_hand,
            low_stock = record.alerts.low_stock,
            "stock item created"
        );
        Ok(record)
    }

    pub fn update_item(
        &self,
        principal: &Principal,
        id: StockItemId,
        patch: StockItemPatch,
    ) -> LedgerResult<StockRecord> {
        require_admin(principal, "stock.update")?;

        let _guard = self.lock_writes();
        let current = self.repo.get(&id)?.ok_or(LedgerError::NotFound)?;
        let merged = patch
            .merge(&current)
            .inspect_err(|e| warn!(stock_item_id = %id, code = e.code(), error = %e, "stock update rejected"))?;

        self.repo.update(merged.clone())?;
        let record = self.record(merged);
        info!(
            stock_item_id = %id,
            quantity_on_hand = record.item.quantity_on_hand,
            reorder_threshold = record.item.reorder_threshold,
            "stock item updated"
        );
        Ok(record)
    }

    pub fn delete_item(&self, principal: &Principal, id: StockItemId) -> LedgerResult<()> {
        require_admin(principal, "stock.delete")?;

        let _guard = self.lock_writes();
        match self.repo.remove(&id)? {
            Some(removed) => {
                info!(stock_item_id = %id, name = %removed.name, "stock item deleted");
                Ok(())
            }
            None => Err(LedgerError::NotFound),
        }
    }

    /// Apply an entry or exit. An exit larger than the on-hand quantity is
    /// rejected whole; nothing is clamped.
    pub fn apply_movement(
        &self,
        principal: &Principal,
        id: StockItemId,
        movement: Movement,
    ) -> LedgerResult<StockRecord> {
        require_admin(principal, "stock.movement")?;

        let _guard = self.lock_writes();
        let current = self.repo.get(&id)?.ok_or(LedgerError::NotFound)?;
        let (kind, moved) = movement.apply(&current, self.clock.now()).inspect_err(|e| {
            warn!(
                stock_item_id = %id,
                kind = %movement.kind,
                quantity = movement.quantity,
                code = e.code(),
                error = %e,
                "stock movement rejected"
            )
        })?;

        self.repo.update(moved.clone())?;
        let record = self.record(moved);
        info!(
            stock_item_id = %id,
            %kind,
            quantity = movement.quantity,
            reason = movement.reason.as_deref().unwrap_or(""),
            before = current.quantity_on_hand,
            after = record.item.quantity_on_hand,
            low_stock = record.alerts.low_stock,
            critical_stock = record.alerts.critical_stock,
            "stock movement applied"
        );
        Ok(record)
    }

    pub fn list_alerts(&self) -> LedgerResult<AlertSummary> {
        Ok(AlertSummary::from_records(&self.records()?))
    }

    pub fn compute_statistics(&self) -> LedgerResult<StockStatistics> {
        Ok(StockStatistics::from_records(&self.records()?))
    }
}
