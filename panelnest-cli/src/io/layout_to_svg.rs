use itertools::Itertools;
use panelnest::entities::{Grain, NestingResult, PlacedPart};
use svg::Document;
use svg::node::element::{Definitions, Group, Title};

use crate::io::svg_util;
use crate::io::svg_util::{SvgDrawOptions, SvgLayoutTheme};

/// Draws a single sheet of a nesting result.
pub fn sheet_to_svg(result: &NestingResult, sheet_index: usize, options: SvgDrawOptions) -> Document {
    let sheet = result.sheet_size.rect();
    let theme = options.theme.theme();

    //leave a 2.5% margin around the sheet
    let (margin_x, margin_y) = (sheet.length * 0.025, sheet.width * 0.025);
    let vbox = (
        sheet.x - margin_x,
        sheet.y - margin_y,
        sheet.length + 2.0 * margin_x,
        sheet.width + 2.0 * margin_y,
    );

    let stroke_width = f64::min(vbox.2, vbox.3) * 0.001 * theme.stroke_width_multiplier;

    let parts = result.parts_on_sheet(sheet_index).collect_vec();
    let used_area = parts.iter().map(|p| p.area()).sum::<f64>();

    //draw sheet
    let sheet_group = Group::new()
        .set("id", format!("sheet_{sheet_index}"))
        .add(svg_util::data_to_path(
            svg_util::rect_data(&sheet),
            &[
                ("fill", &*format!("{}", theme.sheet_fill)),
                (
                    "stroke",
                    &*format!("{}", svg_util::change_brightness(theme.sheet_fill, 0.5)),
                ),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
            ],
        ))
        .add(Title::new(format!(
            "sheet {} of {}, {} {}mm, {} x {}, {} part(s), used: {:.1}%",
            sheet_index + 1,
            result.sheet_count,
            result.material_type,
            result.thickness,
            sheet.length,
            sheet.width,
            parts.len(),
            used_area / sheet.area() * 100.0
        )));

    //one hatch pattern per direction of the grain
    let hatch_distance = f64::min(sheet.length, sheet.width) * 0.01;
    let defs = [true, false]
        .into_iter()
        .fold(Definitions::new(), |defs, horizontal| {
            defs.add(svg_util::grain_pattern(
                grain_pattern_id(horizontal),
                theme.part_fill,
                svg_util::blend_colors(theme.part_fill, theme.grain_stroke),
                hatch_distance,
                stroke_width * 0.5,
                horizontal,
            ))
        });

    //draw parts
    let parts_group = parts.iter().fold(
        Group::new().set("id", "parts").add(defs),
        |group, part| group.add(part_to_svg(part, &theme, options, stroke_width)),
    );

    Document::new()
        .set("viewBox", vbox)
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .add(sheet_group)
        .add(parts_group)
}

fn part_to_svg(
    part: &PlacedPart,
    theme: &SvgLayoutTheme,
    options: SvgDrawOptions,
    stroke_width: f64,
) -> Group {
    let rect = part.rect();
    let (length, width) = part.original_dimensions();

    let fill = match (part.grain_violated && options.highlight_grain_violations, grain_along_x(part)) {
        (true, _) => format!(
            "{}",
            svg_util::blend_colors(theme.part_fill, theme.violation_highlight_color)
        ),
        (false, Some(horizontal)) if options.draw_grain => {
            format!("url(#{})", grain_pattern_id(horizontal))
        }
        _ => format!("{}", theme.part_fill),
    };

    let title = Title::new(format!(
        "part, id: {}, item: {}, {} x {} at ({}, {}), rotation: {}, grain: {:?}{}",
        part.instance_id,
        part.item_id,
        length,
        width,
        part.x,
        part.y,
        part.rotation.degrees(),
        part.grain,
        match part.grain_violated {
            true => " (violated)",
            false => "",
        }
    ));

    let mut group = Group::new()
        .set("id", format!("part_{}", part.instance_id))
        .add(svg_util::data_to_path(
            svg_util::rect_data(&rect),
            &[
                ("fill", &*fill),
                ("stroke-width", &*format!("{stroke_width}")),
                ("stroke", "black"),
                ("opacity", "0.9"),
            ],
        ))
        .add(title);

    if options.draw_edge_banding {
        let banding_style = [
            ("fill", "none"),
            ("stroke", &*format!("{}", theme.banding_stroke)),
            ("stroke-width", &*format!("{}", 3.0 * stroke_width)),
            ("stroke-linecap", "square"),
        ];
        for (start, end) in banded_edges(part) {
            group = group.add(svg_util::data_to_path(
                svg_util::edge_data(start, end),
                &banding_style,
            ));
        }
    }

    group
}

fn grain_pattern_id(horizontal: bool) -> &'static str {
    match horizontal {
        true => "grain_x",
        false => "grain_y",
    }
}

/// Whether the grain of a placed part runs along the x-axis of the sheet, `None` if it has no grain
fn grain_along_x(part: &PlacedPart) -> Option<bool> {
    match part.grain {
        Grain::None => None,
        Grain::Length => Some(!part.rotation.is_rotated()),
        Grain::Width => Some(part.rotation.is_rotated()),
    }
}

/// Edges of a placed part which receive banding, in sheet coordinates
fn banded_edges(part: &PlacedPart) -> Vec<((f64, f64), (f64, f64))> {
    let r = part.rect();
    let top = ((r.x, r.y), (r.x_max(), r.y));
    let bottom = ((r.x, r.y_max()), (r.x_max(), r.y_max()));
    let left = ((r.x, r.y), (r.x, r.y_max()));
    let right = ((r.x_max(), r.y), (r.x_max(), r.y_max()));

    //the length edges of a part follow the x-axis unless it is rotated
    let (length_edges, width_edges) = match part.rotation.is_rotated() {
        false => ([top, bottom], [left, right]),
        true => ([left, right], [top, bottom]),
    };
    let eb = &part.edge_banding;
    [
        (eb.length_1, length_edges[0]),
        (eb.length_2, length_edges[1]),
        (eb.width_1, width_edges[0]),
        (eb.width_2, width_edges[1]),
    ]
    .into_iter()
    .filter_map(|(banded, edge)| banded.then_some(edge))
    .collect()
}
