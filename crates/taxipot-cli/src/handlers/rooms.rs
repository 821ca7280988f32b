use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use taxipot_api::RoomApi;
use taxipot_engine::{
    CreateRoomForm, JOIN_FAILED_FALLBACK, Navigation, PageOutcome, SearchController,
    ViewportRegistry,
};
use taxipot_types::{SearchFilter, parse_service_time};

use super::HandlerContext;
use crate::context::ClientContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, LeaveResultViewModel, StatusBadge,
};
use crate::shell::app::{CREATE_FAILED, LEAVE_FAILED, LEFT_ROOM, ROOM_CREATED};

pub struct SearchArgs {
    pub departure: u32,
    pub destination: u32,
    pub page: u32,
    pub size: Option<u32>,
    pub all: bool,
}

/// One page (or every page with `--all`) through the same controller the
/// interactive search uses, so dedup and `last` handling match.
pub fn search(ctx: &ClientContext, hctx: &HandlerContext, args: SearchArgs) -> Result<()> {
    let filter = SearchFilter::new(args.departure, args.destination);
    let size = args.size.unwrap_or(ctx.config().page_size);
    let mut search = SearchController::new(ViewportRegistry::new())
        .with_page_size(size)
        .with_filter(filter);

    let mut next = search.fetch_page(args.page, true);
    while let Some(ticket) = next.take() {
        let query = ticket.query().with_sort(ctx.config().sort.clone());
        let result = ctx.block_on(ctx.api().search(&query));
        match search.apply_page(&ticket, result) {
            PageOutcome::Loaded { added, has_more } => {
                tracing::debug!(page = ticket.page, added, has_more, "page fetched");
            }
            PageOutcome::Failed(message) => return Err(anyhow!("Room search failed: {}", message)),
            PageOutcome::Stale => break,
        }
        if args.all {
            next = search.advance_page();
        }
    }

    let list = presenters::present_room_list(
        search.rooms(),
        search.filter(),
        search.page(),
        search.has_more(),
        ctx.config().display_offset(),
    );

    let mut view_model = CommandResultViewModel::new(list);
    if search.has_more() {
        view_model = view_model.with_suggestion(
            Guidance::new("Next page").with_command(format!(
                "taxipot rooms search --from {} --to {} --page {}",
                args.departure,
                args.destination,
                search.page() + 1
            )),
        );
    }
    if let Some(room) = search.rooms().iter().find(|r| !r.is_full()) {
        view_model = view_model.with_suggestion(
            Guidance::new("Join a room").with_command(format!("taxipot rooms join {}", room.room_id)),
        );
    }
    hctx.render(view_model)
}

pub fn join(ctx: &ClientContext, hctx: &HandlerContext, room_id: u32) -> Result<()> {
    ctx.require_login()?;

    ctx.block_on(ctx.api().join(room_id))
        .map_err(|e| anyhow!(e.user_message(JOIN_FAILED_FALLBACK)))?;
    tracing::info!(room_id, "joined room");

    let chat = Navigation::chat(room_id);
    let view_model = CommandResultViewModel::new(presenters::present_join_result(
        room_id,
        chat.target().to_string(),
    ))
    .with_badge(StatusBadge::success("방에 참여했습니다."))
    .with_suggestion(Guidance::new("Check your pot").with_command("taxipot me pot"));
    hctx.render(view_model)
}

pub struct CreateArgs {
    pub departure: u32,
    pub destination: u32,
    pub time: String,
    pub min: u32,
    pub max: u32,
    pub fee: i64,
}

pub fn create(ctx: &ClientContext, hctx: &HandlerContext, args: CreateArgs) -> Result<()> {
    ctx.require_login()?;

    let departure_time = parse_service_time(&args.time)
        .with_context(|| format!("Could not read --time {}", args.time))?;

    let mut form = CreateRoomForm::new();
    form.departure_id = args.departure;
    form.destination_id = args.destination;
    form.departure_time = Some(departure_time);
    form.estimated_fee = args.fee;
    form.set_capacity(args.min, args.max);
    let request = form.validate(Utc::now())?;

    let created = ctx
        .block_on(ctx.api().create_room(&request))
        .map_err(|e| anyhow!(e.user_message(CREATE_FAILED)))?;
    tracing::info!(room_id = created.created_pot_id, "room created");

    let view_model = CommandResultViewModel::new(presenters::present_room_created(
        created.created_pot_id,
        &request,
        ctx.config().display_offset(),
    ))
    .with_badge(StatusBadge::success(ROOM_CREATED));
    hctx.render(view_model)
}

pub fn leave(ctx: &ClientContext, hctx: &HandlerContext, room_id: u32) -> Result<()> {
    ctx.require_login()?;

    ctx.block_on(ctx.api().leave_room(room_id))
        .map_err(|e| anyhow!(e.user_message(LEAVE_FAILED)))?;
    tracing::info!(room_id, "left room");

    let view_model = CommandResultViewModel::new(LeaveResultViewModel { room_id })
        .with_badge(StatusBadge::success(LEFT_ROOM));
    hctx.render(view_model)
}
