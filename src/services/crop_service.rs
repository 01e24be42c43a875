use tracing::info;

use crate::domain::{Crop, CropStatus, RecordId};
use crate::notify::Notification;
use crate::store::RecordStore;
use crate::utils::dates::checked_add_days;

use super::{ensure_farm, fields, FormFields, HandlerContext, ServiceError, ServiceResult};

pub struct CropService;

impl CropService {
    /// Records a newly planted crop on `farm_id` and returns its id.
    ///
    /// Missing or unreadable dates default to today (planting) and today
    /// plus the harvest window (harvest).
    pub fn add(
        store: &mut RecordStore,
        form: &FormFields,
        farm_id: &RecordId,
        ctx: &mut HandlerContext<'_>,
    ) -> ServiceResult<RecordId> {
        ensure_farm(store, farm_id)?;
        let name = form.required(fields::NAME)?;
        let today = ctx.clock.today();
        let window = ctx.policy.harvest_window_days;
        let default_harvest =
            checked_add_days(today, window).ok_or_else(|| ServiceError::InvalidField {
                field: "harvest_window_days",
                reason: format!("{window} days from {today} is outside the calendar"),
            })?;
        let area = form.quantity(fields::AREA, ctx)?;

        let crop = Crop {
            id: store.allocate_id(ctx.policy.id_strategy),
            farm_id: farm_id.clone(),
            name,
            variety: form.text(fields::VARIETY),
            planted_date: form.date_or(fields::PLANTED_DATE, today),
            expected_harvest_date: form.date_or(fields::EXPECTED_HARVEST_DATE, default_harvest),
            status: CropStatus::Planted,
            area,
        };
        let id = crop.id.clone();
        info!(crop_id = %id, farm_id = %farm_id, name = %crop.name, "crop added");
        ctx.notify(Notification::success(format!(
            "{} crop added successfully!",
            crop.name
        )));

        let mut crops = store.crops().to_vec();
        crops.push(crop);
        store.replace_crops(crops);
        Ok(id)
    }
}
