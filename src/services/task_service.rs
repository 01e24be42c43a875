use tracing::{info, warn};

use crate::domain::{EntityKind, RecordId, Task};
use crate::notify::Notification;
use crate::store::RecordStore;

use super::{
    ensure_farm, fields, FormFields, HandlerContext, ReferenceChecks, ServiceError, ServiceResult,
};

pub struct TaskService;

impl TaskService {
    /// Schedules a new, open task on `farm_id` and returns its id.
    pub fn add(
        store: &mut RecordStore,
        form: &FormFields,
        farm_id: &RecordId,
        ctx: &mut HandlerContext<'_>,
    ) -> ServiceResult<RecordId> {
        ensure_farm(store, farm_id)?;
        let title = form.required(fields::TITLE)?;
        let priority = form.choice(fields::PRIORITY)?.unwrap_or_default();
        let crop_id = form.get(fields::CROP_ID).map(RecordId::from);
        if let Some(crop_id) = &crop_id {
            Self::check_crop_reference(store, crop_id, farm_id, ctx)?;
        }

        let task = Task {
            id: store.allocate_id(ctx.policy.id_strategy),
            farm_id: farm_id.clone(),
            crop_id,
            title,
            description: form.text(fields::DESCRIPTION),
            scheduled_date: form.date_or(fields::SCHEDULED_DATE, ctx.clock.today()),
            completed: false,
            priority,
        };
        let id = task.id.clone();
        info!(task_id = %id, farm_id = %farm_id, priority = %task.priority, "task added");
        ctx.notify(Notification::success(format!(
            "Task \"{}\" added successfully!",
            task.title
        )));

        let mut tasks = store.tasks().to_vec();
        tasks.push(task);
        store.replace_tasks(tasks);
        Ok(id)
    }

    /// Flips `completed` on the task with `id`. Returns `false` when no task
    /// matched, in which case nothing changes.
    pub fn toggle_complete(
        store: &mut RecordStore,
        id: &RecordId,
        ctx: &mut HandlerContext<'_>,
    ) -> bool {
        let mut found = false;
        let tasks: Vec<Task> = store
            .tasks()
            .iter()
            .cloned()
            .map(|mut task| {
                if &task.id == id {
                    task.completed = !task.completed;
                    found = true;
                    info!(task_id = %id, completed = task.completed, "task status toggled");
                }
                task
            })
            .collect();
        if found {
            store.replace_tasks(tasks);
        }
        ctx.notify(Notification::success("Task status updated!"));
        found
    }

    fn check_crop_reference(
        store: &RecordStore,
        crop_id: &RecordId,
        farm_id: &RecordId,
        ctx: &HandlerContext<'_>,
    ) -> ServiceResult<()> {
        let resolves = store
            .crop(crop_id)
            .is_some_and(|crop| &crop.farm_id == farm_id);
        if resolves {
            return Ok(());
        }
        match ctx.policy.reference_checks {
            ReferenceChecks::Strict => Err(ServiceError::UnknownReference {
                kind: EntityKind::Crop,
                id: crop_id.clone(),
            }),
            ReferenceChecks::Advisory => {
                warn!(crop_id = %crop_id, farm_id = %farm_id, "task references a crop outside its farm");
                Ok(())
            }
        }
    }
}
