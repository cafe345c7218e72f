use crate::screen::Screen;
use crate::storage::LocalBestScore;
use crate::timers::IntervalScheduler;
use crate::utils::*;
use clap::Args;
use tapgrid_core::{self as game, CellId, CellState, Phase, Points, RoundOutcome};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Tap(CellId),
    Tick(game::TimerHandle),
    PlayAgain,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    id: CellId,
    cell_state: CellState,
    #[prop_or_default]
    flash: Option<Points>,
    #[prop_or_default]
    locked: bool,
    callback: Callback<CellId>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        id,
        cell_state,
        flash,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "cell",
        match cell_state {
            CellState::Idle => classes!(),
            CellState::Hot => classes!("hot"),
            CellState::Consumed => classes!("consumed"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onpointerdown = Callback::from(move |e: PointerEvent| {
        e.prevent_default();
        log::trace!("cell {} pointer down", id);
        callback.emit(id);
    });

    html! {
        <td {class} {onpointerdown}>
            if let Some(points) = flash {
                <span class="points">{format!("+{}", points)}</span>
            }
        </td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    game: Option<game::Game<LocalBestScore>>,
    screen: Screen,
    timers: IntervalScheduler,
    props: GameProps,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.props.seed.unwrap_or_else(js_random_seed)
    }

    fn play_again(&mut self) -> bool {
        let seed = self.next_seed();
        let Some(game) = self.game.take() else {
            return false;
        };
        if !game.phase().is_finished() {
            self.game = Some(game);
            return false;
        }

        let game = game.replay(seed, &mut self.timers);
        self.screen = Screen::new(game.config(), game.best_score());
        self.game = Some(game);
        log::debug!("new round ready");
        true
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let cols = self
            .game
            .as_ref()
            .map_or(game::GRID_SIZE.0, |game| game.config().size.0);
        let locked = self.screen.is_locked();
        let callback = ctx.link().callback(Msg::Tap);

        html! {
            <table class={(!locked).then_some("playable")}>
                {
                    for self.screen.cells.chunks(usize::from(cols)).enumerate().map(|(row, cells)| html! {
                        <tr>
                            {
                                for cells.iter().enumerate().map(|(col, &cell_state)| {
                                    let index = row * usize::from(cols) + col;
                                    let id = index as CellId;
                                    let flash = self.screen.flashes[index];
                                    let callback = callback.clone();
                                    html! {
                                        <CellView {id} {cell_state} {flash} {locked} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_footer(&self, ctx: &Context<Self>) -> Html {
        let message = match self.screen.outcome {
            Some(RoundOutcome::NewBest) => html! { <p class="new-best">{"New best score!"}</p> },
            Some(RoundOutcome::TimeUp) => html! { <p class="time-up">{"Time's up!"}</p> },
            None if self.screen.hint_visible => html! { <p class="hint">{"Tap a dark tile to start the clock"}</p> },
            None => html! {},
        };
        let play_again = self.screen.play_again.then(|| {
            let onclick = ctx.link().callback(|_: MouseEvent| Msg::PlayAgain);
            html! { <button class="play-again" {onclick}>{"Play again"}</button> }
        });

        html! {
            <footer>
                {message}
                {for play_again}
            </footer>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props().clone();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let game = game::Game::new(game::GameConfig::default(), seed, LocalBestScore)
            .expect("default config must be valid");
        let screen = Screen::new(game.config(), game.best_score());

        Self {
            game: Some(game),
            screen,
            timers: IntervalScheduler::new(ctx.link().clone()),
            props,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        if let PlayAgain = msg {
            return self.play_again();
        }

        let Self {
            game,
            screen,
            timers,
            ..
        } = self;
        let Some(game) = game.as_mut() else {
            return false;
        };
        let before = screen.clone();

        match msg {
            Start => {
                log::debug!("start");
                game.start(screen, timers);
            }
            Tap(id) => {
                let outcome = game.tap(id, screen, timers);
                log::trace!("tap {}: {:?}", id, outcome);
            }
            Tick(handle) => game.tick(handle, screen, timers),
            PlayAgain => {}
        }

        if screen.take_celebration() {
            launch_confetti();
        }

        *screen != before
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_start = ctx.link().callback(|_: MouseEvent| Msg::Start);
        let decay_style = format!("width: {:.0}%", self.screen.decay * 100.0);

        let stage = match self.screen.phase {
            Phase::Idle => html! {
                <section class="cover" onclick={on_start}>
                    <h1>{"Tap the dark tiles"}</h1>
                    <p>{"Click to begin"}</p>
                </section>
            },
            Phase::Countdown(count) => html! {
                <section class="countdown"><span>{count}</span></section>
            },
            Phase::Playing | Phase::Ended(_) => html! {
                <>
                    <div class="decay-bar"><div class="fill" style={decay_style}/></div>
                    {self.view_board(ctx)}
                    {self.view_footer(ctx)}
                </>
            },
        };

        html! {
            <div class="tapgrid" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside class="best">{"Best "}{self.screen.best}</aside>
                    <aside class="score">{self.screen.score}</aside>
                    <aside class="time">{self.screen.time}</aside>
                </nav>
                {stage}
            </div>
        }
    }
}
