use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::container::registry::TypeConfigId;
use crate::container::{Managed, SharedManaged};

/// Constructed objects keyed by the registration which produced them.
pub struct InstanceMap {
    objects: HashMap<TypeConfigId, Box<dyn SharedManaged>>,
}

impl InstanceMap {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
        }
    }

    pub fn get(&self, id: TypeConfigId) -> Option<Box<dyn Managed>> {
        self.objects
            .get(&id)
            .map(|object| (**object).dyn_clone().upcast_managed())
    }

    /// Stores `object` unless an object is already stored under `id`, and
    /// returns whichever object ends up stored.
    pub fn store(&mut self, id: TypeConfigId, object: Box<dyn SharedManaged>) -> Box<dyn Managed> {
        let stored = self.objects.entry(id).or_insert(object);
        (**stored).dyn_clone().upcast_managed()
    }

    pub fn contains(&self, id: TypeConfigId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Debug for InstanceMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.objects.keys()).finish()
    }
}

/// Single-instance objects shared by every builder and container of one
/// container tree. Cloning the store yields another handle to the same map.
#[derive(Clone)]
pub struct SingletonStore {
    objects: Arc<Mutex<InstanceMap>>,
}

impl SingletonStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(InstanceMap::new())),
        }
    }

    pub fn get(&self, id: TypeConfigId) -> Option<Box<dyn Managed>> {
        self.objects.lock().get(id)
    }

    pub fn store(&self, id: TypeConfigId, object: Box<dyn SharedManaged>) -> Box<dyn Managed> {
        self.objects.lock().store(id, object)
    }

    pub fn contains(&self, id: TypeConfigId) -> bool {
        self.objects.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }

    /// Returns true if both handles refer to the same map.
    pub fn is_shared_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.objects, &other.objects)
    }
}

impl Default for SingletonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SingletonStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("SingletonStore")
            .field(&*self.objects.lock())
            .finish()
    }
}
