use charming::{
    component::{Axis, Grid, Legend, Title},
    datatype::CompositeValue,
    element::{AxisType, ItemStyle, SplitLine, Tooltip, Trigger},
    series::Scatter,
    Chart,
};
use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::config::{ChartStyle, MarkerStyle};
use crate::model::decimal::DecimalVec;
use crate::model::trade::{Trade, TradeSide};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Buy,
    Sell,
    StopLoss,
    TakeProfit,
}

impl MarkerKind {
    const ALL: [MarkerKind; 4] = [
        MarkerKind::Buy,
        MarkerKind::Sell,
        MarkerKind::StopLoss,
        MarkerKind::TakeProfit,
    ];

    fn series_name(self) -> &'static str {
        match self {
            MarkerKind::Buy => "Buy",
            MarkerKind::Sell => "Sell",
            MarkerKind::StopLoss => "Stop-Loss",
            MarkerKind::TakeProfit => "Take-Profit",
        }
    }

    pub fn style(self, style: &ChartStyle) -> &MarkerStyle {
        match self {
            MarkerKind::Buy => &style.buy,
            MarkerKind::Sell => &style.sell,
            MarkerKind::StopLoss => &style.stop_loss,
            MarkerKind::TakeProfit => &style.take_profit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub time: DateTime<Utc>,
    pub value: DecimalVec,
    pub label: Option<String>,
}

/// Renderer independent plot: markers in the order they are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePlot {
    pub markers: Vec<Marker>,
}

impl TradePlot {
    pub fn from_trades(trades: &[Trade], style: &ChartStyle) -> TradePlot {
        let mut markers = Vec::with_capacity(trades.len() * 3);
        for (i, trade) in trades.iter().enumerate() {
            let side = match trade.side {
                TradeSide::Buy => MarkerKind::Buy,
                TradeSide::Sell => MarkerKind::Sell,
            };
            markers.push(Marker {
                kind: side,
                time: trade.time,
                value: trade.price,
                label: side.style(style).label.clone().filter(|_| i == 0),
            });
            markers.push(Marker {
                kind: MarkerKind::StopLoss,
                time: trade.time,
                value: trade.stop_loss,
                label: style.stop_loss.label.clone().filter(|_| i == 0),
            });
            markers.push(Marker {
                kind: MarkerKind::TakeProfit,
                time: trade.time,
                value: trade.take_profit,
                label: style.take_profit.label.clone().filter(|_| i == 0),
            });
        }
        TradePlot { markers }
    }

    pub fn count(&self, kind: MarkerKind) -> usize {
        self.markers.iter().filter(|m| m.kind == kind).count()
    }

    pub fn legend_entries(&self) -> Vec<&str> {
        self.markers
            .iter()
            .filter_map(|m| m.label.as_deref())
            .unique()
            .collect_vec()
    }

    // Times go out as zone-less strings so the browser shows them as written.
    fn points(&self, kind: MarkerKind) -> Vec<Vec<CompositeValue>> {
        self.markers
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| {
                vec![
                    CompositeValue::from(m.time.format(TIME_FORMAT).to_string()),
                    CompositeValue::from(m.value),
                ]
            })
            .collect_vec()
    }

    pub fn chart(&self, style: &ChartStyle) -> Chart {
        let mut chart = Chart::new()
            .title(Title::new().text(style.title.as_str()).left("center"))
            .legend(Legend::new().top(30).data(self.legend_entries()))
            .tooltip(Tooltip::new().trigger(Trigger::Item))
            .grid(Grid::new().left("10%").right("8%").bottom(60))
            .x_axis(
                Axis::new()
                    .type_(AxisType::Time)
                    .name(style.x_label.as_str())
                    .split_line(SplitLine::new().show(true)),
            )
            .y_axis(
                Axis::new()
                    .type_(AxisType::Value)
                    .name(style.y_label.as_str())
                    .scale(true)
                    .split_line(SplitLine::new().show(true)),
            );

        for kind in MarkerKind::ALL {
            let data = self.points(kind);
            if data.is_empty() {
                continue;
            }
            let marker = kind.style(style);
            chart = chart.series(
                Scatter::new()
                    .name(marker.label.as_deref().unwrap_or(kind.series_name()))
                    .symbol(marker.shape.symbol())
                    .symbol_size(marker.size)
                    .item_style(ItemStyle::new().color(marker.color.as_str()))
                    .data(data),
            );
        }
        chart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lazy_static::lazy_static;

    use charming::datatype::NumericValue;

    use crate::config::MarkerShape;

    lazy_static! {
        static ref STYLE: ChartStyle = ChartStyle::default();
    }

    fn trade(hour: u32, side: TradeSide, price: i32) -> Trade {
        Trade {
            time: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            side,
            price: DecimalVec::new(price),
            stop_loss: DecimalVec::new(price - 1000),
            take_profit: DecimalVec::new(price + 2000),
        }
    }

    #[test]
    fn test_single_buy_example() {
        let plot = TradePlot::from_trades(&[trade(0, TradeSide::Buy, 42000)], &STYLE);
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            plot.markers,
            vec![
                Marker {
                    kind: MarkerKind::Buy,
                    time,
                    value: DecimalVec::new(42000),
                    label: None,
                },
                Marker {
                    kind: MarkerKind::StopLoss,
                    time,
                    value: DecimalVec::new(41000),
                    label: Some("Stop-Loss".to_string()),
                },
                Marker {
                    kind: MarkerKind::TakeProfit,
                    time,
                    value: DecimalVec::new(44000),
                    label: Some("Take-Profit".to_string()),
                },
            ]
        );
        assert_eq!(MarkerKind::Buy.style(&STYLE).shape, MarkerShape::TriangleUp);
        assert_eq!(MarkerKind::Buy.style(&STYLE).color, "green");
        assert_eq!(MarkerKind::StopLoss.style(&STYLE).color, "orange");
        assert_eq!(MarkerKind::TakeProfit.style(&STYLE).color, "blue");
    }

    #[test]
    fn test_marker_counts_match_trades() {
        let trades = vec![
            trade(0, TradeSide::Buy, 42000),
            trade(1, TradeSide::Sell, 43000),
            trade(2, TradeSide::Sell, 41000),
            trade(3, TradeSide::Buy, 40000),
            trade(4, TradeSide::Buy, 40500),
        ];
        let plot = TradePlot::from_trades(&trades, &STYLE);
        assert_eq!(plot.count(MarkerKind::Buy) + plot.count(MarkerKind::Sell), 5);
        assert_eq!(plot.count(MarkerKind::Buy), 3);
        assert_eq!(plot.count(MarkerKind::Sell), 2);
        assert_eq!(plot.count(MarkerKind::StopLoss), 5);
        assert_eq!(plot.count(MarkerKind::TakeProfit), 5);
    }

    #[test]
    fn test_legend_has_one_entry_each() {
        let trades = (0..10)
            .map(|h| trade(h, TradeSide::Sell, 42000))
            .collect_vec();
        let plot = TradePlot::from_trades(&trades, &STYLE);
        assert_eq!(plot.legend_entries(), vec!["Stop-Loss", "Take-Profit"]);
        let labelled = plot.markers.iter().filter(|m| m.label.is_some()).count();
        assert_eq!(labelled, 2);
    }

    #[test]
    fn test_sell_uses_sell_marker() {
        let plot = TradePlot::from_trades(&[trade(0, TradeSide::Sell, 42000)], &STYLE);
        assert_eq!(plot.markers[0].kind, MarkerKind::Sell);
        assert_eq!(MarkerKind::Sell.style(&STYLE).shape, MarkerShape::TriangleDown);
        assert_eq!(MarkerKind::Sell.style(&STYLE).color, "red");
    }

    #[test]
    fn test_points_show_time_as_written() {
        let plot = TradePlot::from_trades(&[trade(0, TradeSide::Buy, 42000)], &STYLE);
        let points = plot.points(MarkerKind::Buy);
        assert_eq!(
            points,
            vec![vec![
                CompositeValue::String("2024-01-01 00:00:00".to_string()),
                CompositeValue::Number(NumericValue::Float(42000.0)),
            ]]
        );
        assert!(plot.points(MarkerKind::Sell).is_empty());
    }

    #[test]
    fn test_same_trades_same_plot() {
        let trades = vec![trade(0, TradeSide::Buy, 42000), trade(1, TradeSide::Sell, 43000)];
        assert_eq!(
            TradePlot::from_trades(&trades, &STYLE),
            TradePlot::from_trades(&trades, &STYLE)
        );
    }

    const CROSS: &str = "path://M2,0L5,3L8,0L10,2L7,5L10,8L8,10L5,7L2,10L0,8L3,5L0,2Z";

    fn rendered_option(plot: &TradePlot) -> serde_json::Value {
        serde_json::from_str(&plot.chart(&STYLE).to_string()).unwrap()
    }

    #[test]
    fn test_chart_option() {
        let trades = vec![
            trade(0, TradeSide::Buy, 42000),
            trade(1, TradeSide::Sell, 43000),
            trade(2, TradeSide::Buy, 41000),
        ];
        let plot = TradePlot::from_trades(&trades, &STYLE);
        let option = rendered_option(&plot);

        assert_eq!(
            option["legend"]["data"],
            serde_json::json!([{"name": "Stop-Loss"}, {"name": "Take-Profit"}])
        );
        assert_eq!(option["xAxis"][0]["type"], "time");
        assert_eq!(option["yAxis"][0]["type"], "value");
        assert_eq!(option["xAxis"][0]["splitLine"]["show"], true);
        assert_eq!(option["title"][0]["text"], "Bitcoin RSI Trading - Trade Points");

        let series = option["series"].as_array().unwrap();
        assert_eq!(series.len(), 4);
        let expected = [
            ("Buy", "green", "triangle", 2),
            ("Sell", "red", "path://M0,0L10,0L5,10Z", 1),
            ("Stop-Loss", "orange", CROSS, 3),
            ("Take-Profit", "blue", CROSS, 3),
        ];
        for (s, (name, color, symbol, points)) in series.iter().zip(expected) {
            assert_eq!(s["type"], "scatter");
            assert_eq!(s["name"], name);
            assert_eq!(s["itemStyle"]["color"], color);
            assert_eq!(s["data"].as_array().unwrap().len(), points);
            assert_eq!(s["symbol"], symbol);
        }
        assert_eq!(series[1]["data"][0], serde_json::json!(["2024-01-01 01:00:00", 43000.0]));
    }

    #[test]
    fn test_chart_without_sells_skips_series() {
        let plot = TradePlot::from_trades(&[trade(0, TradeSide::Buy, 42000)], &STYLE);
        let option = rendered_option(&plot);
        let names = option["series"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap().to_string())
            .collect_vec();
        assert_eq!(names, vec!["Buy", "Stop-Loss", "Take-Profit"]);
    }
}
