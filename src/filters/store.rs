// Owner of the filter criteria and the fetch wiring around it. Every
// successful mutation issues exactly one listing fetch built from the
// updated state; responses are tagged with a request id and anything
// older than the latest issued request is discarded on poll.

use std::sync::mpsc;
use std::sync::Arc;

use crate::api::{ApiError, CategoryListProvider, Product, ProductListProvider};
use crate::app::rt;
use crate::catalog::{Category, CategoryDirectory};

use super::query::compose;
use super::tags::{derive_tags, FilterTag, TagKind};
use super::{FilterCriteria, InvalidRangeError, PriceRange};

type Waker = Arc<dyn Fn() + Send + Sync>;

struct NetState {
    /// Monotonically increasing listing request id. Only a response
    /// carrying the current value is applied.
    counter: u64,
    loading: bool,
    tx: mpsc::Sender<(u64, Result<Vec<Product>, ApiError>)>,
    rx: mpsc::Receiver<(u64, Result<Vec<Product>, ApiError>)>,
    last_result: Option<Vec<Product>>,
    last_error: Option<String>,
    cat_started: bool,
    cat_error: Option<String>,
    cat_tx: mpsc::Sender<Result<Vec<Category>, ApiError>>,
    cat_rx: mpsc::Receiver<Result<Vec<Category>, ApiError>>,
}

impl NetState {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let (cat_tx, cat_rx) = mpsc::channel();
        Self {
            counter: 0,
            loading: false,
            tx,
            rx,
            last_result: None,
            last_error: None,
            cat_started: false,
            cat_error: None,
            cat_tx,
            cat_rx,
        }
    }
}

pub struct FilterStore {
    criteria: FilterCriteria,
    directory: CategoryDirectory,
    products: Arc<dyn ProductListProvider>,
    categories: Arc<dyn CategoryListProvider>,
    net: NetState,
    waker: Option<Waker>,
}

impl FilterStore {
    pub fn new(
        products: Arc<dyn ProductListProvider>,
        categories: Arc<dyn CategoryListProvider>,
    ) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            directory: CategoryDirectory::default(),
            products,
            categories,
            net: NetState::new(),
            waker: None,
        }
    }

    /// Called by async tasks after delivering a result, so the UI can
    /// repaint without busy-polling.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        self.waker = Some(Arc::new(waker));
    }

    /// Initial load: the category directory (once) and the unfiltered
    /// product listing.
    pub fn start(&mut self) {
        if !self.net.cat_started {
            self.net.cat_started = true;
            self.start_fetch_categories();
        }
        self.start_fetch();
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn directory(&self) -> &CategoryDirectory {
        &self.directory
    }

    pub fn directory_error(&self) -> Option<&str> {
        self.net.cat_error.as_deref()
    }

    pub fn products(&self) -> Option<&[Product]> {
        self.net.last_result.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.net.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.net.last_error.as_deref()
    }

    pub fn tags(&self) -> Vec<FilterTag> {
        derive_tags(&self.criteria, &self.directory)
    }

    pub fn set_category(&mut self, id: crate::catalog::CategoryId) {
        self.criteria.category_id = Some(id);
        self.start_fetch();
    }

    pub fn clear_category(&mut self) {
        self.criteria.category_id = None;
        self.start_fetch();
    }

    /// No debouncing: every call, including one per keystroke, fetches
    /// immediately. Stale responses are discarded by request id.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_key = text.into();
        self.start_fetch();
    }

    pub fn clear_search(&mut self) {
        self.criteria.search_key = String::new();
        self.start_fetch();
    }

    /// Rejects inverted or out-of-bounds input without touching state or
    /// issuing a fetch.
    pub fn set_price_range(&mut self, min: u64, max: u64) -> Result<(), InvalidRangeError> {
        let range = PriceRange::new(min, max)?;
        self.criteria.price_range = Some(range);
        self.start_fetch();
        Ok(())
    }

    pub fn clear_price_range(&mut self) {
        self.criteria.price_range = None;
        self.start_fetch();
    }

    /// Close action of an active-filter tag: clears that dimension only.
    pub fn dismiss(&mut self, kind: TagKind) {
        log::debug!("dismissing {kind} filter tag");
        match kind {
            TagKind::Category => self.clear_category(),
            TagKind::Price => self.clear_price_range(),
            TagKind::Search => self.clear_search(),
        }
    }

    fn start_fetch(&mut self) {
        self.net.loading = true;
        self.net.last_error = None;

        self.net.counter = self.net.counter.wrapping_add(1);
        let req_id = self.net.counter;
        let query = compose(&self.criteria);
        log::debug!("listing fetch #{req_id}: {query:?}");

        let provider = Arc::clone(&self.products);
        let tx = self.net.tx.clone();
        let waker = self.waker.clone();
        rt().spawn(async move {
            let res = provider.fetch(query).await;
            if let Err(err) = &res {
                log::error!("listing fetch #{req_id} failed: {err}");
            }
            let _ = tx.send((req_id, res));
            if let Some(wake) = waker {
                wake();
            }
        });
    }

    fn start_fetch_categories(&mut self) {
        let provider = Arc::clone(&self.categories);
        let tx = self.net.cat_tx.clone();
        let waker = self.waker.clone();
        rt().spawn(async move {
            let res = provider.fetch().await;
            if let Err(err) = &res {
                log::error!("category fetch failed: {err}");
            }
            let _ = tx.send(res);
            if let Some(wake) = waker {
                wake();
            }
        });
    }

    /// Drains incoming results. Listing responses whose request id is not
    /// the latest issued are dropped so an out-of-order reply can never
    /// overwrite fresher data.
    pub fn poll(&mut self) {
        while let Ok((id, res)) = self.net.rx.try_recv() {
            if id != self.net.counter {
                log::debug!("discarding stale listing fetch #{id} (current #{})", self.net.counter);
                continue;
            }
            self.net.loading = false;
            match res {
                Ok(items) => {
                    self.net.last_error = None;
                    self.net.last_result = Some(items);
                }
                Err(e) => {
                    self.net.last_result = None;
                    self.net.last_error = Some(e.to_string());
                }
            }
        }

        while let Ok(res) = self.net.cat_rx.try_recv() {
            match res {
                Ok(list) => {
                    self.net.cat_error = None;
                    self.directory = CategoryDirectory::from_list(list);
                }
                Err(e) => {
                    self.net.cat_error = Some(e.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryId;
    use crate::filters::ProductQuery;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    struct RecordingProducts {
        queries: Mutex<Vec<ProductQuery>>,
        /// When false the provider records the query and never answers,
        /// leaving response delivery to the test.
        respond: bool,
    }

    impl RecordingProducts {
        fn new(respond: bool) -> Arc<Self> {
            Arc::new(Self {
                queries: Mutex::new(Vec::new()),
                respond,
            })
        }

        fn recorded(&self) -> Vec<ProductQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductListProvider for RecordingProducts {
        async fn fetch(&self, query: ProductQuery) -> Result<Vec<Product>, ApiError> {
            let marker = product_named(&format!("result for {:?}", query.search_key));
            self.queries.lock().unwrap().push(query);
            if !self.respond {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            Ok(vec![marker])
        }
    }

    struct StaticCategories {
        fetches: Mutex<u32>,
    }

    impl StaticCategories {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fetches: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl CategoryListProvider for StaticCategories {
        async fn fetch(&self) -> Result<Vec<Category>, ApiError> {
            *self.fetches.lock().unwrap() += 1;
            Ok(vec![
                Category {
                    id: CategoryId(3),
                    name: "Electronics".to_string(),
                },
                Category {
                    id: CategoryId(7),
                    name: "Books".to_string(),
                },
            ])
        }
    }

    fn product_named(name: &str) -> Product {
        Product {
            id: 1,
            name: name.to_string(),
            price: 1_000_000,
            category_id: CategoryId(3),
        }
    }

    fn store_with(
        products: Arc<RecordingProducts>,
        categories: Arc<StaticCategories>,
    ) -> FilterStore {
        FilterStore::new(products, categories)
    }

    /// Polls the store until the predicate holds or a deadline passes.
    fn pump(store: &mut FilterStore, mut done: impl FnMut(&FilterStore) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            store.poll();
            if done(store) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for store");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// Waits until the provider has recorded `n` queries.
    fn wait_recorded(products: &RecordingProducts, n: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while products.queries.lock().unwrap().len() < n {
            assert!(Instant::now() < deadline, "timed out waiting for queries");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn initial_state_fetches_both_providers_once_with_empty_queries() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories.clone());

        assert!(store.criteria().is_empty());
        assert!(store.tags().is_empty());

        store.start();
        pump(&mut store, |s| {
            s.products().is_some() && !s.directory().is_empty()
        });

        assert_eq!(products.recorded(), vec![ProductQuery::default()]);
        assert_eq!(*categories.fetches.lock().unwrap(), 1);
        assert!(store.criteria().is_empty());
        assert!(store.tags().is_empty());
    }

    #[test]
    fn category_set_and_clear() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories.clone());
        store.start();
        pump(&mut store, |s| !s.directory().is_empty());

        store.set_category(CategoryId(3));
        wait_recorded(&products, 2);
        let query = products.recorded()[1].clone();
        assert_eq!(query.category_id, Some(CategoryId(3)));
        assert!(query.search_key.is_empty());
        assert!(query.price_filter.is_none());

        let tags = store.tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::Category);
        assert_eq!(tags[0].label, "Electronics");

        store.clear_category();
        wait_recorded(&products, 3);
        assert!(store.tags().is_empty());
        assert_eq!(products.recorded()[2].category_id, None);
    }

    #[test]
    fn per_keystroke_fetches_and_stale_responses_are_discarded() {
        let products = RecordingProducts::new(false);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories);

        store.set_search("p");
        store.set_search("ph");
        store.set_search("phone");
        wait_recorded(&products, 3);

        let mut keys: Vec<String> = products
            .recorded()
            .into_iter()
            .map(|q| q.search_key)
            .collect();
        keys.sort();
        assert_eq!(keys, ["p", "ph", "phone"]);

        // Deliver the responses out of order: the reply to "phone" carries
        // the latest request id (3) and must win; 1 and 2 are stale.
        let tx = store.net.tx.clone();
        tx.send((1, Ok(vec![product_named("stale p")]))).unwrap();
        tx.send((3, Ok(vec![product_named("fresh phone")]))).unwrap();
        store.poll();
        assert_eq!(store.products().unwrap()[0].name, "fresh phone");
        assert!(!store.is_loading());

        tx.send((2, Ok(vec![product_named("stale ph")]))).unwrap();
        store.poll();
        assert_eq!(store.products().unwrap()[0].name, "fresh phone");
    }

    #[test]
    fn stale_error_responses_are_discarded_too() {
        let products = RecordingProducts::new(false);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories);

        store.set_search("a");
        store.set_search("ab");
        wait_recorded(&products, 2);

        let tx = store.net.tx.clone();
        tx.send((2, Ok(vec![product_named("fresh")]))).unwrap();
        tx.send((1, Err(ApiError::Api("boom".to_string())))).unwrap();
        store.poll();
        assert!(store.last_error().is_none());
        assert_eq!(store.products().unwrap()[0].name, "fresh");
    }

    #[test]
    fn invalid_price_range_is_rejected_without_mutation_or_fetch() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories);

        store.set_search("phone");
        wait_recorded(&products, 1);
        let before = store.criteria().clone();

        let err = store.set_price_range(20_000_000, 1_000_000).unwrap_err();
        assert_eq!(
            err,
            InvalidRangeError {
                min: 20_000_000,
                max: 1_000_000
            }
        );
        assert_eq!(store.criteria(), &before);
        assert_eq!(products.recorded().len(), 1);

        let err = store.set_price_range(0, crate::filters::PRICE_MAX + 1).unwrap_err();
        assert_eq!(err.max, crate::filters::PRICE_MAX + 1);
        assert_eq!(store.criteria(), &before);
    }

    #[test]
    fn valid_price_range_produces_tag_label() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories);

        store.set_price_range(1_000_000, 20_000_000).unwrap();
        let tags = store.tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].label, "price range from: 1000000 - 20000000");
    }

    #[test]
    fn dismissing_one_tag_leaves_the_other_dimensions_untouched() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();
        let mut store = store_with(products.clone(), categories);
        store.start();
        pump(&mut store, |s| !s.directory().is_empty());

        // A barrier between mutations keeps the provider's recording order
        // deterministic.
        store.set_category(CategoryId(3));
        wait_recorded(&products, 2);
        store.set_search("phone");
        wait_recorded(&products, 3);
        store.set_price_range(1_000_000, 20_000_000).unwrap();
        wait_recorded(&products, 4);

        let kinds: Vec<TagKind> = store.tags().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [TagKind::Category, TagKind::Price, TagKind::Search]);

        store.dismiss(TagKind::Price);
        let kinds: Vec<TagKind> = store.tags().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [TagKind::Category, TagKind::Search]);
        assert_eq!(store.criteria().category_id, Some(CategoryId(3)));
        assert_eq!(store.criteria().search_key, "phone");
        assert!(store.criteria().price_range.is_none());

        // The fetch issued by the dismissal still carries the survivors.
        wait_recorded(&products, 5);
        let last = products.recorded().last().unwrap().clone();
        assert_eq!(last.category_id, Some(CategoryId(3)));
        assert_eq!(last.search_key, "phone");
        assert!(last.price_filter.is_none());
    }

    #[test]
    fn clear_operations_commute() {
        let products = RecordingProducts::new(true);
        let categories = StaticCategories::new();

        let mut a = store_with(products.clone(), categories.clone());
        a.set_category(CategoryId(3));
        a.set_search("phone");
        a.set_price_range(1_000_000, 20_000_000).unwrap();
        let mut b = FilterStore::new(products, categories);
        b.set_category(CategoryId(3));
        b.set_search("phone");
        b.set_price_range(1_000_000, 20_000_000).unwrap();

        a.clear_category();
        a.clear_search();
        a.clear_price_range();
        b.clear_price_range();
        b.clear_search();
        b.clear_category();

        assert_eq!(a.criteria(), b.criteria());
        assert!(a.criteria().is_empty());
    }
}
