#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use test_case::test_case;

    use spatia_cli::config::SpatialConfig;
    use spatia_cli::io;
    use spatia_cli::io::svg_export::shapes_to_svg;
    use spatia_cli::relate::RelationRun;
    use spatia_rs::geometry::SpatialRelation;

    fn relation_of(run: &RelationRun, a: usize, b: usize) -> SpatialRelation {
        let i = run
            .instance
            .pairs
            .iter()
            .position(|&p| p == (a, b))
            .unwrap();
        run.relations[i]
    }

    #[test_case(true; "parallel")]
    #[test_case(false; "sequential")]
    fn example_instance(parallel: bool) {
        let ext_instance = io::read_json_instance(Path::new("assets/example.json")).unwrap();
        let config = SpatialConfig {
            parallel,
            ..SpatialConfig::default()
        };
        let run = RelationRun::new(&ext_instance, &config).unwrap();

        //all ordered pairs
        assert_eq!(run.relations.len(), 6 * 5);
        assert_eq!(relation_of(&run, 0, 1), SpatialRelation::Contains);
        assert_eq!(relation_of(&run, 1, 0), SpatialRelation::Within);
        assert_eq!(relation_of(&run, 2, 3), SpatialRelation::Contains);
        assert_eq!(relation_of(&run, 3, 0), SpatialRelation::Disjoint);

        let total: usize = run.histogram().iter().map(|(_, n)| n).sum();
        assert_eq!(total, run.relations.len());

        let output = run.output(ext_instance, config);
        assert_eq!(output.relations.len(), 30);
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"Contains\""));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let ext_instance = io::read_json_instance(Path::new("assets/example.json")).unwrap();
        let runs = [true, false].map(|parallel| {
            let config = SpatialConfig {
                parallel,
                ..SpatialConfig::default()
            };
            RelationRun::new(&ext_instance, &config).unwrap()
        });
        assert_eq!(runs[0].relations, runs[1].relations);
    }

    #[test]
    fn cartesian_config() {
        let file = File::open("assets/config_cartesian.json").unwrap();
        let config: SpatialConfig = serde_json::from_reader(BufReader::new(file)).unwrap();
        assert!(!config.context.geo);

        let ext_instance = io::read_json_instance(Path::new("assets/example.json")).unwrap();
        //the dateline rectangle has min_x > max_x, which is invalid on a plane
        assert!(RelationRun::new(&ext_instance, &config).is_err());

        let mut ext_instance = ext_instance;
        ext_instance.shapes.remove(0);
        let run = RelationRun::new(&ext_instance, &config).unwrap();
        assert_eq!(run.relations.len(), 5 * 4);

        let svg = shapes_to_svg(&run.instance.shapes, &run.ctx, config.svg_draw_options.unwrap());
        assert!(svg.to_string().contains("shape_4"));
    }
}
