use std::{
    any::Any,
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;

/// Per-instance memo store for a single computation.
///
/// Owned as an explicit field of the instance it serves and created empty at
/// construction. Entries are never evicted; the store lives and dies with
/// its owner and is not shared between instances.
///
/// The lock is not held while computing, so concurrent first calls with the
/// same key may both run the computation. The last write wins, which is
/// only sound for pure computations.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the memoized value for `key`, computing and storing it on
    /// the first call.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.entries.lock().get(&key) {
            return value.clone();
        }
        let value = compute();
        self.entries.lock().insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a [`MethodCache`] entry: the method's name plus a hash of its
/// argument tuple, so several memoized methods can share one store. The
/// hash alone does not identify a call; entries keep the argument tuple
/// and compare it on every hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodKey {
    method: &'static str,
    args: u64,
}

impl MethodKey {
    pub fn new<A: Hash>(method: &'static str, args: &A) -> Self {
        let mut hasher = DefaultHasher::new();
        args.hash(&mut hasher);
        Self {
            method,
            args: hasher.finish(),
        }
    }
}

type BoxedEntry = Arc<dyn Any + Send + Sync>;

/// Shared memo store for several methods of one instance.
///
/// Results are type-erased so methods with different return types can share
/// the store; each call site names itself and supplies its argument tuple,
/// and gets its previously computed result back without recomputation.
/// A stored entry only counts as a hit if its argument tuple equals the
/// requested one; a hash-colliding tuple recomputes and overwrites.
/// Same locking discipline and lifetime as [`MemoCache`].
#[derive(Debug, Default)]
pub struct MethodCache {
    entries: Mutex<HashMap<MethodKey, BoxedEntry>>,
}

impl MethodCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute<A, R>(
        &self,
        method: &'static str,
        args: A,
        compute: impl FnOnce() -> R,
    ) -> Arc<R>
    where
        A: Hash + Eq + Send + Sync + 'static,
        R: Send + Sync + 'static,
    {
        let key = MethodKey::new(method, &args);
        if let Some(entry) = self.entries.lock().get(&key) {
            if let Ok(hit) = Arc::clone(entry).downcast::<(A, Arc<R>)>() {
                if hit.0 == args {
                    return Arc::clone(&hit.1);
                }
            }
        }
        let value = Arc::new(compute());
        self.entries
            .lock()
            .insert(key, Arc::new((args, Arc::clone(&value))) as BoxedEntry);
        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Lazily computed value cached for the lifetime of its owner.
///
/// The analogue of [`MemoCache`] for a zero-argument accessor: computed at
/// most once per instance on first read, returned by reference thereafter.
pub struct CachedCell<T> {
    cell: OnceLock<T>,
}

impl<T> CachedCell<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(compute)
    }

    /// Peeks at the cached value without computing it.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }
}

impl<T> Default for CachedCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CachedCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.debug_tuple("CachedCell").field(&self.cell.get()).finish()
    }
}
