use core::any::{Any, TypeId};
use std::{collections::HashMap, sync::RwLock};

use once_cell::sync::{Lazy, OnceCell};

type Registry = HashMap<TypeId, &'static (dyn Any + Send + Sync)>;

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Process-wide instance of `T`, built by `init` on first request.
///
/// Every call for the same `T` returns the same address for the lifetime of the process.
/// `init` runs at most once per type, even when several threads race on the first call.
/// `init` runs outside the registry lock and may itself ask for singletons of other types.
pub(crate) fn type_singleton<T>(init: impl FnOnce() -> T) -> &'static T
where
    T: Any + Send + Sync,
{
    cell::<T>().get_or_init(init)
}

fn cell<T>() -> &'static OnceCell<T>
where
    T: Any + Send + Sync,
{
    let key = TypeId::of::<T>();
    {
        let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
        if let Some(&cell) = registry.get(&key) {
            return downcast(cell);
        }
    }
    let mut registry = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    // Another writer may have won the race between the two locks
    let cell = *registry.entry(key).or_insert_with(|| {
        let leaked: &'static OnceCell<T> = Box::leak(Box::new(OnceCell::new()));
        leaked as &'static (dyn Any + Send + Sync)
    });
    downcast(cell)
}

fn downcast<T: Any>(cell: &'static (dyn Any + Send + Sync)) -> &'static OnceCell<T> {
    match cell.downcast_ref::<OnceCell<T>>() {
        Some(v) => v,
        None => unreachable!("registry keyed by `TypeId`"),
    }
}
