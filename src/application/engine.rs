use super::command::Command;
use super::config::EngineConfig;
use super::view::View;
use crate::domain::catalog::{Catalog, ItemId};
use crate::domain::money::{Denomination, Money};
use crate::domain::outcome::{Notice, Outcome};
use crate::domain::ports::StockStoreBox;
use crate::domain::session::{PaymentMethod, Phase, Session};
use crate::error::{Result, VendingError};
use crate::infrastructure::in_memory::InMemoryStockLedger;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

struct Shared {
    catalog: Catalog,
    stock: StockStoreBox,
    config: EngineConfig,
    session: RwLock<Session>,
    views: watch::Sender<View>,
}

/// The vending machine's transaction state machine.
///
/// `TransactionEngine` owns the active [`Session`] and the stock ledger and
/// enforces every rule itself: payment-method exclusivity, stock and balance
/// checks, and the busy guard. It is a cheap handle; clones drive the same
/// machine.
///
/// A purchase or change return releases the session lock across its
/// simulated delay so the `Dispensing` phase stays observable. While the
/// phase is `Checking` or `Dispensing` every session command is rejected
/// with [`VendingError::EngineBusy`]. Both cycles run on their own task, so
/// dropping the returned future never strands the machine mid-cycle.
#[derive(Clone)]
pub struct TransactionEngine {
    inner: Arc<Shared>,
}

impl TransactionEngine {
    /// Creates an engine with a fresh `Idle` session.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The price list; it never changes afterwards.
    /// * `stock` - The ledger holding remaining counts for the catalog items.
    /// * `config` - Dispense, change-return and card settle delays.
    pub fn new(catalog: Catalog, stock: StockStoreBox, config: EngineConfig) -> Self {
        let levels: BTreeMap<ItemId, u32> = catalog
            .entries()
            .iter()
            .map(|entry| (entry.id.clone(), entry.stock))
            .collect();
        let initial = View::build(&Session::new(), &catalog, &levels);
        let (views, _) = watch::channel(initial);

        Self {
            inner: Arc::new(Shared {
                catalog,
                stock,
                config,
                session: RwLock::new(Session::new()),
                views,
            }),
        }
    }

    /// The factory machine: standard catalog, in-memory ledger, nominal delays.
    pub fn standard() -> Self {
        let catalog = Catalog::standard();
        let stock = Box::new(InMemoryStockLedger::from_catalog(&catalog));
        Self::new(catalog, stock, EngineConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Watches every view change, including transient phases.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.inner.views.subscribe()
    }

    /// Reads the current session and stock without side effects.
    pub async fn view(&self) -> Result<View> {
        let session = self.inner.session.read().await;
        let levels = self.inner.stock.snapshot().await?;
        Ok(View::build(&session, &self.inner.catalog, &levels))
    }

    /// Runs one command to completion.
    pub async fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::SelectCard => self.select_card().await,
            Command::SelectDenomination(denomination) => {
                self.select_denomination(denomination).await
            }
            Command::InsertCash => self.insert_cash().await,
            Command::Purchase(item) => self.purchase(&item).await,
            Command::ReturnChange => self.return_change().await,
            Command::Reset => self.reset().await,
            Command::SetCardFaultSimulation(enabled) => {
                Ok(self.set_card_fault_simulation(enabled).await)
            }
        }
    }

    pub async fn select_card(&self) -> Result<Outcome> {
        let mut session = self.inner.session.write().await;
        session.ensure_settled()?;
        session.claim_method(PaymentMethod::Card)?;
        session.notice = Some(Notice::CardTagged);

        debug!("card tagged");
        self.publish(&session).await;
        Ok(Outcome::CardSelected)
    }

    /// Chooses which note or coin the next `insert_cash` adds.
    pub async fn select_denomination(&self, denomination: Denomination) -> Result<Outcome> {
        let mut session = self.inner.session.write().await;
        session.ensure_settled()?;
        session.claim_method(PaymentMethod::Cash)?;
        session.selected_denomination = denomination;
        session.notice = Some(Notice::DenominationSelected { denomination });

        debug!(%denomination, "denomination selected");
        self.publish(&session).await;
        Ok(Outcome::DenominationSelected { denomination })
    }

    /// Inserts a single unit of the selected denomination.
    pub async fn insert_cash(&self) -> Result<Outcome> {
        let mut session = self.inner.session.write().await;
        session.ensure_settled()?;
        session.claim_method(PaymentMethod::Cash)?;
        let added = session.insert_selected();
        let balance = session.inserted_total;
        session.notice = Some(Notice::CashInserted { added, balance });

        debug!(%added, %balance, "cash inserted");
        self.publish(&session).await;
        Ok(Outcome::CashInserted { added, balance })
    }

    /// Sells one unit of `item`.
    ///
    /// A card purchase always ends the session, whether it succeeds or the
    /// card is declined. A cash purchase keeps the session open with the
    /// remaining balance. Out-of-stock and insufficient-funds rejections
    /// leave the session in `PaymentPending` with nothing charged.
    pub async fn purchase(&self, item: &ItemId) -> Result<Outcome> {
        let engine = self.clone();
        let item = item.clone();
        tokio::spawn(async move { engine.run_purchase(&item).await }).await?
    }

    /// Pays out the whole cash balance and ends the session.
    pub async fn return_change(&self) -> Result<Outcome> {
        let engine = self.clone();
        tokio::spawn(async move { engine.run_return_change().await }).await?
    }

    /// Discards the session, including any balance and the card fault flag.
    pub async fn reset(&self) -> Result<Outcome> {
        let mut session = self.inner.session.write().await;
        session.ensure_settled()?;
        if !session.inserted_total.is_zero() {
            warn!(balance = %session.inserted_total, "session reset with cash balance");
        }
        *session = Session::new();

        debug!("session reset");
        self.publish(&session).await;
        Ok(Outcome::SessionReset)
    }

    /// Makes card purchases in this session fail. Accepted at any time.
    pub async fn set_card_fault_simulation(&self, enabled: bool) -> Outcome {
        let mut session = self.inner.session.write().await;
        session.card_fault_simulated = enabled;

        debug!(enabled, "card fault simulation toggled");
        self.publish(&session).await;
        Outcome::CardFaultSimulation { enabled }
    }

    async fn run_purchase(&self, item: &ItemId) -> Result<Outcome> {
        let (method, price) = self.check_purchase(item).await?;

        tokio::time::sleep(self.inner.config.dispense_delay).await;

        let remaining = match self.inner.stock.decrement(item).await {
            Ok(remaining) => remaining,
            Err(e) => {
                self.abort_dispense(method, price).await;
                return Err(e);
            }
        };

        let mut session = self.inner.session.write().await;
        let balance = if method == PaymentMethod::Cash {
            let balance = session.inserted_total;
            session.phase = Phase::PaymentPending;
            session.notice = Some(Notice::Purchased {
                item: item.clone(),
                balance: Some(balance),
            });
            self.publish(&session).await;
            Some(balance)
        } else {
            session.phase = Phase::Completed;
            session.notice = Some(Notice::Purchased {
                item: item.clone(),
                balance: None,
            });
            self.publish(&session).await;
            self.end_card_session(&mut session).await;
            None
        };

        info!(%item, %price, remaining, %method, "item dispensed");
        Ok(Outcome::Dispensed {
            item: item.clone(),
            price,
            remaining,
            balance,
        })
    }

    async fn run_return_change(&self) -> Result<Outcome> {
        let amount = {
            let mut session = self.inner.session.write().await;
            session.ensure_settled()?;
            if session.payment_method != PaymentMethod::Cash || session.inserted_total.is_zero() {
                return Err(VendingError::NothingToReturn);
            }

            let amount = session.inserted_total;
            session.phase = Phase::Dispensing;
            session.notice = Some(Notice::ReturningChange { amount });
            self.publish(&session).await;
            amount
        };

        tokio::time::sleep(self.inner.config.change_delay).await;

        let mut session = self.inner.session.write().await;
        *session = Session::new();
        self.publish(&session).await;

        info!(%amount, "change returned");
        Ok(Outcome::ChangeReturned { amount })
    }

    /// Validates a purchase and moves the session to `Dispensing`.
    ///
    /// Returns the method and the price; for cash the price is already
    /// deducted from the balance.
    async fn check_purchase(&self, item: &ItemId) -> Result<(PaymentMethod, Money)> {
        let mut session = self.inner.session.write().await;
        session.ensure_settled()?;

        let method = session.payment_method;
        if method == PaymentMethod::None {
            return Err(VendingError::NoPaymentMethod);
        }
        let price = self
            .inner
            .catalog
            .get(item)
            .map(|entry| entry.price)
            .ok_or_else(|| VendingError::UnknownItem(item.clone()))?;

        session.phase = Phase::Checking;
        session.notice = Some(Notice::Checking { item: item.clone() });
        self.publish(&session).await;

        let level = match self.inner.stock.level(item).await {
            Ok(level) => level.unwrap_or(0),
            Err(e) => {
                warn!(%item, error = %e, "stock check failed");
                session.phase = Phase::PaymentPending;
                self.publish(&session).await;
                return Err(e);
            }
        };

        if level == 0 {
            session.phase = Phase::Error;
            session.notice = Some(Notice::OutOfStock { item: item.clone() });
            self.publish(&session).await;
            session.phase = Phase::PaymentPending;
            self.publish(&session).await;
            return Err(VendingError::OutOfStock { item: item.clone() });
        }

        match method {
            PaymentMethod::Card if session.card_fault_simulated => {
                session.phase = Phase::Error;
                session.notice = Some(Notice::CardDeclined);
                self.publish(&session).await;
                self.end_card_session(&mut session).await;

                debug!(%item, "card declined");
                return Err(VendingError::CardDeclined { item: item.clone() });
            }
            PaymentMethod::Cash => match session.inserted_total.checked_sub(price) {
                Some(rest) => session.inserted_total = rest,
                None => {
                    let balance = session.inserted_total;
                    session.phase = Phase::Error;
                    session.notice = Some(Notice::InsufficientFunds { balance, price });
                    self.publish(&session).await;
                    session.phase = Phase::PaymentPending;
                    self.publish(&session).await;
                    return Err(VendingError::InsufficientFunds { balance, price });
                }
            },
            _ => {}
        }

        session.phase = Phase::Dispensing;
        session.notice = Some(Notice::Dispensing { item: item.clone() });
        self.publish(&session).await;
        Ok((method, price))
    }

    /// Card sessions are single-shot. The ending phase stays on screen for
    /// the settle delay, with the lock held so nothing interleaves.
    async fn end_card_session(&self, session: &mut Session) {
        let settle = self.inner.config.card_settle_delay;
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }
        *session = Session::new();
        self.publish(session).await;
    }

    /// Undoes a purchase whose dispense could not be recorded.
    async fn abort_dispense(&self, method: PaymentMethod, price: Money) {
        let mut session = self.inner.session.write().await;
        warn!(%method, %price, "dispense aborted, purchase rolled back");
        if method == PaymentMethod::Cash {
            session.inserted_total += price;
            session.phase = Phase::PaymentPending;
        } else {
            *session = Session::new();
        }
        self.publish(&session).await;
    }

    async fn publish(&self, session: &Session) {
        match self.inner.stock.snapshot().await {
            Ok(levels) => {
                self.inner
                    .views
                    .send_replace(View::build(session, &self.inner.catalog, &levels));
            }
            Err(e) => warn!(error = %e, "stock snapshot failed, view not refreshed"),
        }
    }
}
