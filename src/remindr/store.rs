//! Persistent task/template store.
//!
//! The whole app state is one flat blob: postcard-serialized
//! [`StoreData`] written under a single key in internal flash. The
//! in-memory cache tracks a dirty flag so unchanged state never costs a
//! flash write; a missing or corrupt blob loads as empty state.

use super::task::Task;
use crate::config::{MAX_TASKS, MAX_TASK_TEXT, MAX_TEMPLATES, MAX_TEMPLATE_NAME};
use crate::error::Error;
use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

#[cfg(feature = "embedded")]
use crate::config::{MAX_STORE_BLOB, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};

/// A named snapshot of a pending task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: u32,
    pub name: String<MAX_TEMPLATE_NAME>,
    pub tasks: Vec<Task, MAX_TASKS>,
}

/// Everything that persists across power cycles.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub tasks: Vec<Task, MAX_TASKS>,
    pub templates: Vec<Template, MAX_TEMPLATES>,
}

/// In-memory cache of the settings blob, synced with flash.
pub struct Store {
    data: StoreData,
    dirty: bool,
}

impl Store {
    pub const fn new() -> Self {
        Self {
            data: StoreData {
                tasks: Vec::new(),
                templates: Vec::new(),
            },
            dirty: false,
        }
    }

    pub fn from_data(data: StoreData) -> Self {
        Self { data, dirty: false }
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Tasks

    pub fn add_task(&mut self, task: Task) -> Result<(), Error> {
        self.data
            .tasks
            .push(task)
            .map_err(|_| Error::CapacityExceeded)?;
        self.dirty = true;
        Ok(())
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.data.tasks.iter().find(|t| t.id == id)
    }

    /// Mutable task access; assumes the caller mutates, so marks dirty.
    pub fn task_mut(&mut self, id: u32) -> Option<&mut Task> {
        let task = self.data.tasks.iter_mut().find(|t| t.id == id);
        if task.is_some() {
            self.dirty = true;
        }
        task
    }

    /// Tasks still waiting to be completed.
    pub fn pending_tasks(&self) -> impl Iterator<Item = &Task> {
        self.data.tasks.iter().filter(|t| !t.complete)
    }

    pub fn rename_task(&mut self, id: u32, text: &str) -> Result<(), Error> {
        let task = self.task_mut(id).ok_or(Error::NotFound)?;
        task.text = bounded_string::<MAX_TASK_TEXT>(text);
        Ok(())
    }

    // Templates

    /// Snapshot the pending tasks under a new template name. Copies,
    /// never aliases: later task edits leave the template untouched.
    pub fn create_template_from_pending(&mut self, id: u32, name: &str) -> Result<(), Error> {
        let mut tasks: Vec<Task, MAX_TASKS> = Vec::new();
        for task in self.data.tasks.iter().filter(|t| !t.complete) {
            tasks.push(task.clone()).map_err(|_| Error::CapacityExceeded)?;
        }
        let template = Template {
            id,
            name: bounded_string::<MAX_TEMPLATE_NAME>(name),
            tasks,
        };
        self.data
            .templates
            .push(template)
            .map_err(|_| Error::CapacityExceeded)?;
        self.dirty = true;
        Ok(())
    }

    pub fn template(&self, id: u32) -> Option<&Template> {
        self.data.templates.iter().find(|t| t.id == id)
    }

    /// Replace the whole task list with a copy of the template's tasks.
    pub fn apply_template(&mut self, id: u32) -> Result<(), Error> {
        let tasks = self.template(id).ok_or(Error::NotFound)?.tasks.clone();
        self.data.tasks = tasks;
        self.dirty = true;
        Ok(())
    }

    /// Add the template's tasks to the current list, replacing any task
    /// that shares an id.
    pub fn append_template(&mut self, id: u32) -> Result<(), Error> {
        let template = self.template(id).ok_or(Error::NotFound)?.clone();
        for task in template.tasks {
            if let Some(existing) = self.data.tasks.iter_mut().find(|t| t.id == task.id) {
                *existing = task;
            } else {
                self.data
                    .tasks
                    .push(task)
                    .map_err(|_| Error::CapacityExceeded)?;
            }
        }
        self.dirty = true;
        Ok(())
    }

    pub fn rename_template(&mut self, id: u32, name: &str) {
        if let Some(template) = self.data.templates.iter_mut().find(|t| t.id == id) {
            template.name = bounded_string::<MAX_TEMPLATE_NAME>(name);
            self.dirty = true;
        }
    }

    pub fn delete_template(&mut self, id: u32) {
        if let Some(pos) = self.data.templates.iter().position(|t| t.id == id) {
            self.data.templates.remove(pos);
            self.dirty = true;
        }
    }

    // Blob codec

    /// Serialize the store into `buf`, returning the used prefix.
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b [u8], Error> {
        postcard::to_slice(&self.data, buf)
            .map(|used| &*used)
            .map_err(|_| Error::Codec)
    }

    /// Decode a blob, degrading to empty state when it does not parse
    /// (first boot, or a torn write).
    pub fn decode(blob: &[u8]) -> StoreData {
        postcard::from_bytes(blob).unwrap_or_default()
    }
}

fn bounded_string<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

// Flash persistence (embedded only)

#[cfg(feature = "embedded")]
mod flash {
    use super::*;

    /// Flash page size for nRF52840 (4 KB).
    const FLASH_PAGE_SIZE: u32 = 4096;

    const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
    const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

    /// Key for the settings blob in the map storage.
    const KEY_SETTINGS: u8 = 0x01;

    impl Store {
        /// Load the blob from flash; any failure loads empty state.
        pub async fn load_from_flash(
            &mut self,
            flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
        ) {
            let mut buf = [0u8; MAX_STORE_BLOB];
            match sequential_storage::map::fetch_item::<u8, &[u8], _>(
                flash,
                STORAGE_START..STORAGE_END,
                &mut sequential_storage::cache::NoCache::new(),
                &mut buf,
                &KEY_SETTINGS,
            )
            .await
            {
                Ok(Some(blob)) => {
                    self.data = Store::decode(blob);
                    defmt::info!(
                        "Loaded {} tasks, {} templates from flash",
                        self.data.tasks.len(),
                        self.data.templates.len()
                    );
                }
                Ok(None) => {
                    defmt::info!("No settings blob in flash");
                    self.data = StoreData::default();
                }
                Err(e) => {
                    defmt::warn!("Flash read error: {:?}", defmt::Debug2Format(&e));
                    self.data = StoreData::default();
                }
            }
            self.dirty = false;
        }

        /// Persist the blob when dirty. A failed write leaves the dirty
        /// flag set so the next save retries.
        pub async fn save_to_flash(
            &mut self,
            flash: &mut impl embedded_storage_async::nor_flash::NorFlash,
        ) {
            if !self.dirty {
                return;
            }

            let mut blob_buf = [0u8; MAX_STORE_BLOB];
            let blob = match self.encode(&mut blob_buf) {
                Ok(blob) => blob,
                Err(_) => {
                    defmt::warn!("Settings blob too large to encode");
                    return;
                }
            };

            let mut buf = [0u8; MAX_STORE_BLOB];
            match sequential_storage::map::store_item::<u8, &[u8], _>(
                flash,
                STORAGE_START..STORAGE_END,
                &mut sequential_storage::cache::NoCache::new(),
                &mut buf,
                &KEY_SETTINGS,
                &blob,
            )
            .await
            {
                Ok(()) => {
                    defmt::info!("Saved settings blob ({} bytes)", blob.len());
                    self.dirty = false;
                }
                Err(e) => {
                    defmt::warn!("Flash write error: {:?}", defmt::Debug2Format(&e));
                }
            }
        }
    }
}
