use tracing::{debug, info};

use crate::domain::{EntityKind, Identifiable, RecordId};
use crate::notify::Notification;
use crate::store::RecordStore;

use super::HandlerContext;

pub struct RecordService;

impl RecordService {
    /// Removes the `kind` record with `id`. Returns whether anything was
    /// removed; an unknown id leaves the store as it was.
    pub fn delete(
        store: &mut RecordStore,
        kind: EntityKind,
        id: &RecordId,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        let removed = match kind {
            EntityKind::Crop => {
                let (kept, removed) = without(store.crops(), id);
                if removed {
                    store.replace_crops(kept);
                }
                removed
            }
            EntityKind::Task => {
                let (kept, removed) = without(store.tasks(), id);
                if removed {
                    store.replace_tasks(kept);
                }
                removed
            }
            EntityKind::Expense => {
                let (kept, removed) = without(store.expenses(), id);
                if removed {
                    store.replace_expenses(kept);
                }
                removed
            }
        };

        if removed {
            info!(kind = %kind, id = %id, "record deleted");
            ctx.notify(Notification::success(format!(
                "{kind} deleted successfully!"
            )));
        } else {
            debug!(kind = %kind, id = %id, "delete matched nothing");
            ctx.notify(Notification::info(format!(
                "No {} with id {id}; nothing deleted.",
                kind.label().to_lowercase()
            )));
        }
        removed
    }
}

fn without<T: Identifiable + Clone>(records: &[T], id: &RecordId) -> (Vec<T>, bool) {
    let kept: Vec<T> = records
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect();
    let removed = kept.len() != records.len();
    (kept, removed)
}
