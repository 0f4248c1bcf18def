use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase { Start, Move, End }

/// Input as delivered by the host, in screen points.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PointerDown(egui::Pos2),
    PointerMove(egui::Pos2),
    PointerUp(egui::Pos2),
    /// Pointer left the surface; treated as a release at that position.
    PointerLeave(egui::Pos2),
    TouchStart(Vec<egui::Pos2>),
    TouchMove(Vec<egui::Pos2>),
    TouchEnd(Vec<egui::Pos2>),
}

impl HostEvent {
    pub fn phase(&self) -> GesturePhase {
        match self {
            HostEvent::PointerDown(_) | HostEvent::TouchStart(_) => GesturePhase::Start,
            HostEvent::PointerMove(_) | HostEvent::TouchMove(_) => GesturePhase::Move,
            HostEvent::PointerUp(_) | HostEvent::PointerLeave(_) | HostEvent::TouchEnd(_) => GesturePhase::End,
        }
    }

    fn screen_pos(&self) -> Option<egui::Pos2> {
        match self {
            HostEvent::PointerDown(p) | HostEvent::PointerMove(p)
            | HostEvent::PointerUp(p) | HostEvent::PointerLeave(p) => Some(*p),
            HostEvent::TouchStart(t) | HostEvent::TouchMove(t) | HostEvent::TouchEnd(t) => t.first().copied(),
        }
    }
}

/// Maps host events to surface-local coordinates and keeps the gesture bound
/// to the first touch that started inside the surface.
#[derive(Default)]
pub struct PointerTracker {
    last: Option<egui::Pos2>,
    primary_touch: Option<egui::TouchId>,
}

impl PointerTracker {
    pub fn new() -> Self { Self { last: None, primary_touch: None } }

    /// Position of `event` relative to `bounds.min`, in surface pixels.
    /// Touch events without touch points (the usual case for touch end)
    /// reuse the last position.
    pub fn locate(&mut self, event: &HostEvent, bounds: egui::Rect, pixels_per_point: f32) -> Option<egui::Pos2> {
        let local: egui::Pos2 = match event.screen_pos() {
            Some(p) => egui::pos2((p.x - bounds.min.x) * pixels_per_point, (p.y - bounds.min.y) * pixels_per_point),
            None => self.last?,
        };
        self.last = Some(local);
        Some(local)
    }

    /// Translates one frame of egui input into host events. egui synthesizes
    /// pointer events from touches, so when the frame carries real touch
    /// events the pointer ones are dropped to avoid handling the same contact
    /// twice. Only the primary touch drives the gesture; other fingers are
    /// ignored until it lifts.
    pub fn collect(&mut self, events: &[egui::Event], bounds: egui::Rect, pressing: bool) -> Vec<HostEvent> {
        let has_touch: bool = events.iter().any(|e| matches!(e, egui::Event::Touch { .. }));
        let mut out: Vec<HostEvent> = Vec::new();
        let mut inside_press: bool = pressing;

        for event in events {
            match event {
                egui::Event::Touch { id, phase, pos, .. } => match phase {
                    egui::TouchPhase::Start => {
                        if self.primary_touch.is_none() && bounds.contains(*pos) {
                            self.primary_touch = Some(*id);
                            out.push(HostEvent::TouchStart(vec![*pos]));
                        }
                    }
                    egui::TouchPhase::Move => {
                        if self.primary_touch == Some(*id) { out.push(HostEvent::TouchMove(vec![*pos])); }
                    }
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        if self.primary_touch == Some(*id) {
                            self.primary_touch = None;
                            out.push(HostEvent::TouchEnd(Vec::new()));
                        }
                    }
                },
                _ if has_touch => {}
                egui::Event::PointerButton { pos, button: egui::PointerButton::Primary, pressed, .. } => {
                    if *pressed && bounds.contains(*pos) {
                        inside_press = true;
                        out.push(HostEvent::PointerDown(*pos));
                    } else if !*pressed && inside_press {
                        inside_press = false;
                        out.push(HostEvent::PointerUp(*pos));
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    if bounds.contains(*pos) {
                        out.push(HostEvent::PointerMove(*pos));
                    } else if inside_press {
                        inside_press = false;
                        out.push(HostEvent::PointerLeave(*pos));
                    }
                }
                _ => {}
            }
        }
        out
    }
}
